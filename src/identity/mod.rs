//! User identity records for the volume authorization service.
//! Keep the public surface thin and split implementation across sub-modules.

mod policy;
mod user_type;
mod ak;
mod vol_ak;
mod params;

pub use policy::{AuthorizedVols, PolicySnapshot, UserPolicy};
pub use user_type::UserType;
pub use ak::{AkPolicy, UserAk, CREATE_TIME_FORMAT};
pub use vol_ak::VolAk;
pub use params::{UserCreateParam, UserUpdateParam};
