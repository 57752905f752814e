//! Clients for external collaborators.

mod identity_client;

pub use identity_client::{
    Claims, DisabledIdentityProvider, FirebaseIdentityClient, IdentityProvider,
};
