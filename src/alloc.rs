use crate::error::{Error, Result};
use crate::node::Node;

/// Limits applied while a document is being parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseOptions {
  pub max_depth: usize,
  pub max_nodes: Option<usize>,
  pub max_text_bytes: Option<usize>,
}

impl Default for ParseOptions {
  fn default() -> Self {
    Self {
      max_depth: 512,
      max_nodes: None,
      max_text_bytes: None,
    }
  }
}

impl ParseOptions {
  pub fn max_depth(mut self, depth: usize) -> Self {
    self.max_depth = depth;
    self
  }

  pub fn max_nodes(mut self, nodes: usize) -> Self {
    self.max_nodes = Some(nodes);
    self
  }

  pub fn max_text_bytes(mut self, bytes: usize) -> Self {
    self.max_text_bytes = Some(bytes);
    self
  }
}

/// Allocation context handed to every construction step of one parse.
///
/// Each node costs one unit of `max_nodes`, each owned text costs its length
/// in bytes of `max_text_bytes`. Growth goes through `try_reserve`, so an
/// allocator refusal is reported as [`ErrorKind::OutOfMemory`] rather than
/// aborting the process.
///
/// [`ErrorKind::OutOfMemory`]: crate::ErrorKind::OutOfMemory
#[derive(Debug)]
pub struct Alloc {
  nodes_left: Option<usize>,
  text_left: Option<usize>,
}

impl Alloc {
  pub fn new(options: &ParseOptions) -> Self {
    Self {
      nodes_left: options.max_nodes,
      text_left: options.max_text_bytes,
    }
  }

  pub fn node(&mut self) -> Result<Node> {
    charge(&mut self.nodes_left, 1)?;
    Ok(Node::new())
  }

  pub fn text(&mut self, bytes: &[u8]) -> Result<String> {
    charge(&mut self.text_left, bytes.len())?;
    let mut buf = Vec::new();
    buf
      .try_reserve_exact(bytes.len())
      .map_err(|e| Error::out_of_memory().with_source(e))?;
    buf.extend_from_slice(bytes);
    String::from_utf8(buf).map_err(|e| Error::syntax().with_source(e))
  }

  pub fn push(&mut self, children: &mut Vec<Node>, child: Node) -> Result<()> {
    children
      .try_reserve(1)
      .map_err(|e| Error::out_of_memory().with_source(e))?;
    children.push(child);
    Ok(())
  }
}

fn charge(left: &mut Option<usize>, cost: usize) -> Result<()> {
  match left {
    None => Ok(()),
    Some(n) if *n >= cost => {
      *n -= cost;
      Ok(())
    }
    Some(_) => Err(Error::out_of_memory()),
  }
}

#[cfg(test)]
mod tests {
  use super::{Alloc, ParseOptions};
  use crate::{ErrorKind, Kind};

  #[test]
  fn unlimited_by_default() {
    let mut alloc = Alloc::new(&ParseOptions::default());
    for _ in 0..1000 {
      assert_eq!(alloc.node().unwrap().kind(), Kind::Null);
    }
    assert_eq!(alloc.text(b"hello").unwrap(), "hello");
  }

  #[test]
  fn node_budget() {
    let mut alloc = Alloc::new(&ParseOptions::default().max_nodes(2));
    assert!(alloc.node().is_ok());
    assert!(alloc.node().is_ok());
    assert_eq!(alloc.node().unwrap_err().kind(), ErrorKind::OutOfMemory);
  }

  #[test]
  fn text_budget() {
    let mut alloc = Alloc::new(&ParseOptions::default().max_text_bytes(5));
    assert_eq!(alloc.text(b"abc").unwrap(), "abc");
    assert_eq!(alloc.text(b"de").unwrap(), "de");
    assert_eq!(alloc.text(b"f").unwrap_err().kind(), ErrorKind::OutOfMemory);
    assert_eq!(alloc.text(b"").unwrap(), "");
  }

  #[test]
  fn text_must_be_utf8() {
    let mut alloc = Alloc::new(&ParseOptions::default());
    assert_eq!(alloc.text(b"\xff").unwrap_err().kind(), ErrorKind::Syntax);
  }

  #[test]
  fn push_appends_in_order() {
    let mut alloc = Alloc::new(&ParseOptions::default());
    let mut children = Vec::new();
    for _ in 0..3 {
      let node = alloc.node().unwrap();
      alloc.push(&mut children, node).unwrap();
    }
    assert_eq!(children.len(), 3);
  }
}
