//! Vehicle classes and their distance coefficients.

use super::TollError;

/// Vehicle classes charged by the toll engine.
///
/// # Examples
/// ```
/// use waymark_core::VehicleClass;
///
/// assert_eq!(VehicleClass::Rv.as_str(), "rv");
/// assert_eq!("TRUCK".parse::<VehicleClass>(), Ok(VehicleClass::Truck));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VehicleClass {
    /// Motorcycles.
    Moto,
    /// Passenger cars.
    Car,
    /// Recreational vehicles.
    Rv,
    /// Buses.
    Bus,
    /// Trucks.
    Truck,
}

impl VehicleClass {
    /// Every class in column order.
    pub const ALL: [Self; 5] = [Self::Moto, Self::Car, Self::Rv, Self::Bus, Self::Truck];

    /// Return the class as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Moto => "moto",
            Self::Car => "car",
            Self::Rv => "rv",
            Self::Bus => "bus",
            Self::Truck => "truck",
        }
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VehicleClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "moto" => Ok(Self::Moto),
            "car" => Ok(Self::Car),
            "rv" => Ok(Self::Rv),
            "bus" => Ok(Self::Bus),
            "truck" => Ok(Self::Truck),
            _ => Err(format!("unknown vehicle class '{s}'")),
        }
    }
}

/// One value per vehicle class.
///
/// Used both for rates and for the coefficients that produce them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleRates {
    /// Motorcycle value.
    pub moto: f64,
    /// Car value.
    pub car: f64,
    /// Recreational vehicle value.
    pub rv: f64,
    /// Bus value.
    pub bus: f64,
    /// Truck value.
    pub truck: f64,
}

impl VehicleRates {
    /// Build a value set by evaluating `value_for` once per class.
    pub fn from_fn(mut value_for: impl FnMut(VehicleClass) -> f64) -> Self {
        Self {
            moto: value_for(VehicleClass::Moto),
            car: value_for(VehicleClass::Car),
            rv: value_for(VehicleClass::Rv),
            bus: value_for(VehicleClass::Bus),
            truck: value_for(VehicleClass::Truck),
        }
    }

    /// Value for `class`.
    #[must_use]
    pub const fn get(&self, class: VehicleClass) -> f64 {
        match class {
            VehicleClass::Moto => self.moto,
            VehicleClass::Car => self.car,
            VehicleClass::Rv => self.rv,
            VehicleClass::Bus => self.bus,
            VehicleClass::Truck => self.truck,
        }
    }

    /// Apply `transform` to every class value.
    #[must_use]
    pub fn map(&self, mut transform: impl FnMut(f64) -> f64) -> Self {
        Self::from_fn(|class| transform(self.get(class)))
    }

    /// Multiply every class value by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        self.map(|value| value * factor)
    }
}

/// Per-class multipliers applied to a base distance.
///
/// Defaults: moto 0.8, car 1.2, rv 1.5, bus 2.2, truck 3.6.
///
/// # Examples
/// ```
/// use waymark_core::{RateCoefficients, VehicleClass};
///
/// let coefficients = RateCoefficients::default();
/// assert_eq!(coefficients.coefficient(VehicleClass::Truck), 3.6);
/// let rates = coefficients.rates_for(10.0);
/// assert_eq!(rates.truck, 36.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RateCoefficients(VehicleRates);

impl RateCoefficients {
    /// Validate explicit coefficients.
    ///
    /// # Errors
    /// Returns [`TollError::InvalidCoefficient`] for a negative or non-finite
    /// coefficient.
    pub fn new(coefficients: VehicleRates) -> Result<Self, TollError> {
        Self(coefficients).validate()
    }

    /// Check that every coefficient is finite and non-negative.
    ///
    /// # Errors
    /// Returns [`TollError::InvalidCoefficient`] naming the first bad class.
    pub fn validate(self) -> Result<Self, TollError> {
        for class in VehicleClass::ALL {
            let value = self.coefficient(class);
            if !value.is_finite() || value < 0.0 {
                return Err(TollError::InvalidCoefficient { class, value });
            }
        }
        Ok(self)
    }

    /// Coefficient for `class`.
    #[must_use]
    pub const fn coefficient(&self, class: VehicleClass) -> f64 {
        self.0.get(class)
    }

    /// Replace the coefficient for `class`, keeping the others.
    #[must_use]
    pub fn with_coefficient(self, class: VehicleClass, value: f64) -> Self {
        Self(VehicleRates::from_fn(|each| {
            if each == class {
                value
            } else {
                self.coefficient(each)
            }
        }))
    }

    /// Class rates for a base `distance`.
    #[must_use]
    pub fn rates_for(&self, distance: f64) -> VehicleRates {
        VehicleRates::from_fn(|class| distance * self.coefficient(class))
    }
}

impl Default for RateCoefficients {
    fn default() -> Self {
        Self(VehicleRates {
            moto: 0.8,
            car: 1.2,
            rv: 1.5,
            bus: 2.2,
            truck: 3.6,
        })
    }
}
