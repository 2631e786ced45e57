use std::{error::Error as StdError, fmt, io};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
  /// Any grammar violation, including numbers that fail conversion.
  Syntax,
  /// The allocation context refused a node, text, or nesting level.
  OutOfMemory,
  /// Reading the source failed before parsing started.
  Io,
}

#[derive(Debug)]
pub struct Error {
  kind: ErrorKind,
  source: Option<Box<dyn StdError + Send + Sync>>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
  pub fn new(kind: ErrorKind) -> Self {
    Self { kind, source: None }
  }

  pub fn syntax() -> Self {
    Self::new(ErrorKind::Syntax)
  }

  pub fn out_of_memory() -> Self {
    Self::new(ErrorKind::OutOfMemory)
  }

  pub fn kind(&self) -> ErrorKind {
    self.kind
  }

  pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
    self.source = Some(Box::new(source));
    self
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kind {
      ErrorKind::Syntax => f.write_str("invalid JSON"),
      ErrorKind::OutOfMemory => f.write_str("out of memory"),
      ErrorKind::Io => match &self.source {
        Some(source) => write!(f, "read failed: {}", source),
        None => f.write_str("read failed"),
      },
    }
  }
}

impl StdError for Error {
  fn source(&self) -> Option<&(dyn StdError + 'static)> {
    self
      .source
      .as_ref()
      .map(|source| source.as_ref() as &(dyn StdError + 'static))
  }
}

impl From<io::Error> for Error {
  fn from(e: io::Error) -> Self {
    Error::new(ErrorKind::Io).with_source(e)
  }
}
