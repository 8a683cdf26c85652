//! Partitioning of drivers by whether they currently hold a car.

/// Anything that may reference an assigned car.
pub trait CarHolder {
    fn car_id(&self) -> Option<i64>;

    fn has_car(&self) -> bool {
        self.car_id().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarFilter {
    WithCar,
    WithoutCar,
}

impl CarFilter {
    pub fn matches<T: CarHolder>(self, driver: &T) -> bool {
        match self {
            CarFilter::WithCar => driver.has_car(),
            CarFilter::WithoutCar => !driver.has_car(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriverPartition<T> {
    pub with_cars: Vec<T>,
    pub without_cars: Vec<T>,
}

impl<T> Default for DriverPartition<T> {
    fn default() -> Self {
        Self {
            with_cars: Vec::new(),
            without_cars: Vec::new(),
        }
    }
}

/// Drivers matching `filter`, in input order.
pub fn filter_drivers<T: CarHolder>(drivers: &[T], filter: CarFilter) -> Vec<&T> {
    drivers.iter().filter(|d| filter.matches(*d)).collect()
}

/// Split drivers in one pass; each side keeps input order.
pub fn partition<T, I>(drivers: I) -> DriverPartition<T>
where
    T: CarHolder,
    I: IntoIterator<Item = T>,
{
    let mut out = DriverPartition::default();
    for driver in drivers {
        if driver.has_car() {
            out.with_cars.push(driver);
        } else {
            out.without_cars.push(driver);
        }
    }
    out
}
