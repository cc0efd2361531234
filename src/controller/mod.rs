pub mod reducer;

pub use reducer::{reduce, DashboardEvent, DashboardState, UploadPayload};
