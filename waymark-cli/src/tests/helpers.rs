//! Dataset fixtures shared by the CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

pub(super) const SEGMENTS_CSV: &str = "id_start,id_end,distance\n\
                                       1001400,1001402,9.7\n\
                                       1001402,1001404,20.2\n\
                                       1001404,1001406,16.0\n";

pub(super) const TRIPS_CSV: &str = "id_start,id_end,start,end\n\
                                    1001400,1001402,2024-04-03T12:00:00,2024-04-03T12:30:00\n";

pub(super) const INTERVALS_CSV: &str = "id,id_2,startDay,startTime,endDay,endTime\n\
                                        1014000,-1,Monday,00:00:00,Sunday,23:59:59\n";

pub(super) const COUNTS_CSV: &str = "id_1,id_2,route,moto,car,rv,bus,truck\n\
                                     801,802,14,2,16,1,6,8\n\
                                     802,801,14,1,24,2,4,9\n\
                                     801,803,20,0,10,0,2,3\n";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write dataset file");
}

/// Temporary directory holding the datasets a test writes.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        write_utf8(&path, contents.as_bytes());
        path
    }
}
