use crate::f;

/// Extends Option for easy display formatting
pub trait OptionExt {
    /// Option outputs for summaries
    ///
    /// Generic over anything that implements `Display`, this will either be the
    /// value contained within `Some()` or "none" for the `None` variant.
    ///
    /// ```rust
    /// # use tomokit_utils::OptionExt;
    /// let scores: Option<usize> = Some(120);
    /// assert_eq!(scores.display(), "120");
    ///
    /// let scores: Option<usize> = None;
    /// assert_eq!(scores.display(), "none");
    /// ```
    fn display(&self) -> String;

    /// Same as [display()](OptionExt::display) with a custom placeholder
    ///
    /// ```rust
    /// # use tomokit_utils::OptionExt;
    /// let path: Option<&str> = None;
    /// assert_eq!(path.display_or("not provided"), "not provided");
    /// ```
    fn display_or(&self, placeholder: &str) -> String;
}

impl<T: std::fmt::Display> OptionExt for Option<T> {
    fn display(&self) -> String {
        self.display_or("none")
    }

    fn display_or(&self, placeholder: &str) -> String {
        match self {
            Some(value) => f!("{value}"),
            None => placeholder.to_string(),
        }
    }
}
