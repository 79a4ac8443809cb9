//! Directory entity types.
//!
//! Only the handful of fields a listing needs to identify and describe each
//! entity are modelled; everything else in the payload is ignored.

mod collection;
mod entities;
mod object;

pub use collection::Collection;
pub use entities::{
    Application, Device, Domain, OAuth2PermissionGrant, ServicePrincipal, SubscribedSku,
    TenantDetail, VerifiedDomain,
};
pub use object::{Contact, DirectoryObject, DirectoryRole, Group, User};
