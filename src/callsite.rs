//! Source locations of declared examples.

use std::{borrow::Cow, fmt::Display, panic::Location};

/// The file and line at which an example (or group) was declared.
///
/// Failures are attributed to the callsite of the example they belong to, so
/// a host runner can point at the right line. A callsite never changes after
/// it was created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Callsite {
    file: Cow<'static, str>,
    line: u32,
}

impl Callsite {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self {
            file: Cow::Borrowed(file),
            line,
        }
    }

    pub fn from_owned(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// The callsite of whoever called the current `#[track_caller]` function.
    #[track_caller]
    pub fn caller() -> Self {
        let location: &'static Location<'static> = Location::caller();
        Self::new(location.file(), location.line())
    }

    /// The path of the file the example was declared in.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// The line the example was declared on.
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl From<&Location<'_>> for Callsite {
    fn from(location: &Location<'_>) -> Self {
        Self::from_owned(location.file().to_string(), location.line())
    }
}

impl Display for Callsite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Build a [`Callsite`] for the current source line.
#[macro_export]
macro_rules! callsite {
    () => {
        $crate::callsite::Callsite::new(::std::file!(), ::std::line!())
    };
}
