use shoplite_core::OwnerId;

/// Owner context for a request.
///
/// Authentication itself happens outside this service; by the time a request
/// reaches a domain route, the auth collaborator has reduced it to an opaque
/// owner id. This is immutable and must be present for all domain routes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OwnerContext {
    owner_id: OwnerId,
}

impl OwnerContext {
    pub fn new(owner_id: OwnerId) -> Self {
        Self { owner_id }
    }

    pub fn owner_id(&self) -> OwnerId {
        self.owner_id
    }
}
