use crate::node::{Node, Value};
use std::{
  fmt,
  io::{self, Write},
};

/// Debug rendering: one line per node with its key, kind, and scalar value.
impl fmt::Display for Node {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut buf = String::new();
    self.format(&mut buf, "  ", 0);
    f.write_str(buf.trim_end_matches('\n'))
  }
}

impl Node {
  pub fn dump(&self, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", self)
  }

  fn format(&self, buf: &mut String, indent: &str, level: usize) {
    (0..level).for_each(|_| buf.push_str(indent));
    if let Some(key) = self.key() {
      buf.push_str(key);
      buf.push_str(": ");
    }
    buf.push_str(&format!("{:?}", self.kind()));

    match self.value() {
      Value::Null | Value::Object(_) | Value::Array(_) => {}
      Value::String(x) => buf.push_str(&format!(" \"{}\"", x)),
      Value::Integer(x) => buf.push_str(&format!(" {}", x)),
      Value::Double(x) => buf.push_str(&format!(" {}", x)),
      Value::Bool(x) => buf.push_str(&format!(" {}", x)),
    }
    buf.push('\n');

    self
      .children()
      .iter()
      .for_each(|x| x.format(buf, indent, level + 1));
  }
}
