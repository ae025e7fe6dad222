//! Host-side collaborators of the form.

/// Called once per acknowledged save, with no arguments.
///
/// Runs on the form's loop, so it must return promptly. Whatever comes next
/// (navigation, list refresh, unmounting the form) is up to the host.
pub trait OnSave: Send + Sync + 'static {
    fn on_save(&self);
}

impl<F> OnSave for F
where
    F: Fn() + Send + Sync + 'static,
{
    fn on_save(&self) {
        self()
    }
}
