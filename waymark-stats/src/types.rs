//! Input records and output tables for vehicle-count statistics.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One row of a vehicle-count dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleCountRecord {
    /// Origin identifier; rows of the car matrix.
    pub id_1: u64,
    /// Destination identifier; columns of the car matrix.
    pub id_2: u64,
    /// Route the counts were taken on.
    pub route: u64,
    /// Motorcycle count.
    pub moto: f64,
    /// Car count.
    pub car: f64,
    /// Recreational vehicle count.
    pub rv: f64,
    /// Bus count.
    pub bus: f64,
    /// Truck count.
    pub truck: f64,
}

/// Volume band of a car count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarBand {
    /// At most 15 cars.
    Low,
    /// More than 15 and at most 25 cars.
    Medium,
    /// More than 25 cars.
    High,
}

impl CarBand {
    /// Every band, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Band containing `cars`, or `None` for NaN.
    ///
    /// # Examples
    /// ```
    /// use waymark_stats::CarBand;
    ///
    /// assert_eq!(CarBand::classify(15.0), Some(CarBand::Low));
    /// assert_eq!(CarBand::classify(15.5), Some(CarBand::Medium));
    /// assert_eq!(CarBand::classify(25.5), Some(CarBand::High));
    /// assert_eq!(CarBand::classify(f64::NAN), None);
    /// ```
    #[must_use]
    pub fn classify(cars: f64) -> Option<Self> {
        if cars.is_nan() {
            None
        } else if cars <= 15.0 {
            Some(Self::Low)
        } else if cars <= 25.0 {
            Some(Self::Medium)
        } else {
            Some(Self::High)
        }
    }

    /// Lowercase band label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for CarBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dense `id_1 × id_2` table of counts.
///
/// Row and column identifiers are ascending; every row holds one value per
/// column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountMatrix {
    row_ids: Vec<u64>,
    column_ids: Vec<u64>,
    values: Vec<Vec<f64>>,
}

impl CountMatrix {
    /// Lay out `cells` over the given axes, filling gaps with `fill`.
    pub(crate) fn from_cells(
        row_ids: Vec<u64>,
        column_ids: Vec<u64>,
        cells: &BTreeMap<(u64, u64), f64>,
        fill: f64,
    ) -> Self {
        let values = row_ids
            .iter()
            .map(|&row| {
                column_ids
                    .iter()
                    .map(|&col| cells.get(&(row, col)).copied().unwrap_or(fill))
                    .collect()
            })
            .collect();
        Self {
            row_ids,
            column_ids,
            values,
        }
    }

    /// Ascending row identifiers.
    #[must_use]
    pub const fn row_ids(&self) -> &[u64] {
        self.row_ids.as_slice()
    }

    /// Ascending column identifiers.
    #[must_use]
    pub const fn column_ids(&self) -> &[u64] {
        self.column_ids.as_slice()
    }

    /// Value at `(row, col)`, if both identifiers are on the axes.
    #[must_use]
    pub fn get(&self, row: u64, col: u64) -> Option<f64> {
        let row_index = self.row_ids.binary_search(&row).ok()?;
        let col_index = self.column_ids.binary_search(&col).ok()?;
        self.values.get(row_index)?.get(col_index).copied()
    }

    /// Iterate over rows paired with their identifier.
    pub fn rows(&self) -> impl Iterator<Item = (u64, &[f64])> + '_ {
        self.row_ids
            .iter()
            .copied()
            .zip(self.values.iter().map(Vec::as_slice))
    }

    /// Apply `transform` to every cell, keeping the axes.
    #[must_use]
    pub fn map_cells(&self, mut transform: impl FnMut(f64) -> f64) -> Self {
        Self {
            row_ids: self.row_ids.clone(),
            column_ids: self.column_ids.clone(),
            values: self
                .values
                .iter()
                .map(|row| row.iter().map(|&value| transform(value)).collect())
                .collect(),
        }
    }
}

/// All dataset-level statistics in one serialisable report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleCountSummary {
    /// Records per car band, every band present.
    pub car_bands: BTreeMap<CarBand, usize>,
    /// Positions of rows with unusually high bus counts.
    pub bus_outliers: Vec<usize>,
    /// Routes whose mean truck count exceeds the threshold.
    pub heavy_truck_routes: Vec<u64>,
    /// Car matrix after [`adjust_car_value`](crate::adjust_car_value).
    pub adjusted_car_matrix: CountMatrix,
}
