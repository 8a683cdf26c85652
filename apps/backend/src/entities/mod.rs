pub mod car_assignments;
pub mod cars;
pub mod drivers;
pub mod record_status;

pub use car_assignments::Entity as CarAssignments;
pub use car_assignments::Model as CarAssignment;
pub use cars::Entity as Cars;
pub use cars::{EngineType, Model as Car};
pub use drivers::Entity as Drivers;
pub use drivers::{Model as Driver, OnlineStatus};
pub use record_status::RecordStatus;
