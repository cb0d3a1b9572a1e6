pub use super::combustion_request::Entity as CombustionRequest;
pub use super::combustion_request_fuel::Entity as CombustionRequestFuel;
pub use super::fuel::Entity as Fuel;
pub use super::user::Entity as User;
