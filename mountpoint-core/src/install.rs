use crate::{
    container::Container,
    document::Document,
    error::{MountError, Precondition},
    node::Node,
};

/// The body of a document that has passed the mounting preconditions.
pub struct MountPoint {
    body: Node,
}

impl MountPoint {
    /// Checks that `document` has an HTML view with a body, without mutating anything.
    pub fn locate(document: &Document) -> Result<Self, MountError> {
        let html = document
            .as_html()
            .ok_or(Precondition::NotHtmlDocument)?;
        let body = html.body().ok_or(Precondition::MissingBody)?;
        Ok(Self { body })
    }

    pub fn body(&self) -> &Node {
        &self.body
    }

    /// Appends `container` as the last child of the body.
    pub fn append(&self, container: &Container) {
        self.body.insert(container.node(), None);
        log::debug!(
            "attached container {} ({} body children)",
            container.id(),
            self.body.child_count()
        );
    }
}

/// Appends `container` to the body of `document`.
///
/// Fails with [`MountError::PreconditionViolation`] and leaves the document untouched if it has
/// no HTML view or no body. A container that is already attached elsewhere is moved.
pub fn attach(document: &Document, container: &Container) -> Result<(), MountError> {
    MountPoint::locate(document)?.append(container);
    Ok(())
}
