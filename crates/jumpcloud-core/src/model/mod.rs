//! Resource models: configuration and state as the host sees them.
//!
//! Every scalar is a [`Value`](crate::value::Value). Optional blocks that
//! cannot be computed are `Option`s; computed blocks are `Value`s so they can
//! be planned as unknown.

mod active_directory;
mod device_group;
mod user_group;

pub use active_directory::ActiveDirectoryModel;
pub use device_group::DeviceGroupModel;
pub use user_group::{
    LdapGroupModel, LdapModel, MemberQueryModel, PosixGroupModel, RadiusReplyModel, SambaModel,
    SudoModel, UserGroupModel,
};
