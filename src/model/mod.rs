//! Records shared by the server and the client.

pub mod bill;
pub mod cashier;
pub mod menu;
pub mod order;
pub mod product;
pub mod status;
pub mod user;

pub use bill::BillResult;
pub use cashier::Cashier;
pub use menu::Menu;
pub use order::{Order, OrderLine};
pub use product::{Appetizer, Drink, MainCourse, MenuItem, ProductFields, ProductKind};
pub use status::{DatabaseStatus, HealthStatus};
pub use user::{LoginRequest, NewUser, Role, User};
