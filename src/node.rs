/// The closed set of value kinds a [`Node`] can hold.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
  Null,
  Object,
  Array,
  String,
  Integer,
  Double,
  Bool,
}

/// Payload of a node. Composite kinds own their children in document order.
#[derive(Debug, PartialEq)]
pub enum Value {
  Null,
  Object(Vec<Node>),
  Array(Vec<Node>),
  String(String),
  Integer(i64),
  Double(f64),
  Bool(bool),
}

/// One JSON value plus the key it was stored under, if its parent is an object.
#[derive(Debug, PartialEq)]
pub struct Node {
  pub(crate) key: Option<String>,
  pub(crate) value: Value,
}

impl Default for Node {
  fn default() -> Self {
    Self::new()
  }
}

impl Node {
  /// An empty `Null` node without a key.
  pub fn new() -> Self {
    Self {
      key: None,
      value: Value::Null,
    }
  }

  pub fn kind(&self) -> Kind {
    match self.value {
      Value::Null => Kind::Null,
      Value::Object(_) => Kind::Object,
      Value::Array(_) => Kind::Array,
      Value::String(_) => Kind::String,
      Value::Integer(_) => Kind::Integer,
      Value::Double(_) => Kind::Double,
      Value::Bool(_) => Kind::Bool,
    }
  }

  pub fn key(&self) -> Option<&str> {
    self.key.as_deref()
  }

  pub fn value(&self) -> &Value {
    &self.value
  }

  /// Children of an object or array; empty for every other kind.
  pub fn children(&self) -> &[Node] {
    match &self.value {
      Value::Object(xs) | Value::Array(xs) => xs,
      _ => &[],
    }
  }

  pub fn len(&self) -> usize {
    self.children().len()
  }

  pub fn is_empty(&self) -> bool {
    self.children().is_empty()
  }

  pub fn is_null(&self) -> bool {
    matches!(self.value, Value::Null)
  }

  pub fn as_str(&self) -> Option<&str> {
    match &self.value {
      Value::String(x) => Some(x),
      _ => None,
    }
  }

  pub fn as_i64(&self) -> Option<i64> {
    match self.value {
      Value::Integer(x) => Some(x),
      _ => None,
    }
  }

  pub fn as_f64(&self) -> Option<f64> {
    match self.value {
      Value::Double(x) => Some(x),
      _ => None,
    }
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self.value {
      Value::Bool(x) => Some(x),
      _ => None,
    }
  }

  /// First child whose key matches `key` byte for byte.
  pub fn get(&self, key: &str) -> Option<&Node> {
    self.children().iter().find(|x| x.key() == Some(key))
  }

  pub fn get_index(&self, index: usize) -> Option<&Node> {
    self.children().get(index)
  }

  /// Resolves a dot-separated path one segment at a time.
  ///
  /// A segment made only of ASCII digits is always positional, even when the
  /// current node is an object whose keys look numeric. Any miss ends the walk.
  pub fn get_nested(&self, path: &str) -> Option<&Node> {
    path
      .split('.')
      .try_fold(self, |node, segment| match position(segment) {
        Some(index) => node.get_index(index),
        None => node.get(segment),
      })
  }

  /// Tears the tree down: children first, depth-first, then the owned text.
  pub fn release(self) {
    let Node { key, value } = self;
    match value {
      Value::Object(xs) | Value::Array(xs) => xs.into_iter().for_each(Node::release),
      Value::String(x) => drop(x),
      _ => {}
    }
    drop(key);
  }
}

fn position(segment: &str) -> Option<usize> {
  if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  segment.parse().ok()
}

#[cfg(test)]
mod tests {
  use super::{Kind, Node, Value};

  fn leaf(key: Option<&str>, value: Value) -> Node {
    Node {
      key: key.map(str::to_owned),
      value,
    }
  }

  fn object(key: Option<&str>, xs: Vec<Node>) -> Node {
    leaf(key, Value::Object(xs))
  }

  fn sample() -> Node {
    object(
      None,
      vec![
        leaf(Some("name"), Value::String("John".to_owned())),
        leaf(Some("age"), Value::Integer(30)),
        leaf(
          Some("grades"),
          Value::Array(vec![
            leaf(None, Value::Integer(85)),
            leaf(None, Value::Integer(92)),
          ]),
        ),
        object(
          Some("0"),
          vec![leaf(Some("x"), Value::Bool(true))],
        ),
        leaf(Some("name"), Value::String("Jane".to_owned())),
      ],
    )
  }

  #[test]
  fn new_is_empty_null() {
    let node = Node::new();
    assert_eq!(node.kind(), Kind::Null);
    assert_eq!(node.key(), None);
    assert!(node.children().is_empty());
    assert!(node.is_null());
  }

  #[test]
  fn kind_follows_value() {
    let tests = vec![
      (Value::Null, Kind::Null),
      (Value::Object(vec![]), Kind::Object),
      (Value::Array(vec![]), Kind::Array),
      (Value::String("".to_owned()), Kind::String),
      (Value::Integer(1), Kind::Integer),
      (Value::Double(1.5), Kind::Double),
      (Value::Bool(false), Kind::Bool),
    ];
    for (value, expected) in tests {
      assert_eq!(leaf(None, value).kind(), expected);
    }
  }

  #[test]
  fn get() {
    let root = sample();
    assert_eq!(root.get("name").and_then(Node::as_str), Some("John"));
    assert_eq!(root.get("age").and_then(Node::as_i64), Some(30));
    assert_eq!(root.get("Name"), None);
    assert_eq!(root.get("grades").and_then(|x| x.get("0")), None);
    assert_eq!(root.get("age").and_then(|x| x.get("age")), None);
  }

  #[test]
  fn get_index() {
    let root = sample();
    let grades = root.get("grades").unwrap();
    assert_eq!(grades.get_index(0).and_then(Node::as_i64), Some(85));
    assert_eq!(grades.get_index(1).and_then(Node::as_i64), Some(92));
    assert_eq!(grades.get_index(2), None);
    assert_eq!(root.get_index(1).and_then(Node::key), Some("age"));
    assert_eq!(root.get("name").unwrap().get_index(0), None);
  }

  #[test]
  fn get_nested() {
    let root = sample();
    let tests = vec![
      ("name", Some(Kind::String)),
      ("grades.1", Some(Kind::Integer)),
      ("grades.2", None),
      ("grades.x", None),
      ("2.0", Some(Kind::Integer)),
      // positional beats a numeric-looking key
      ("0", Some(Kind::String)),
      ("0.x", None),
      ("3.x", Some(Kind::Bool)),
      ("+1", None),
      ("missing.path", None),
      ("", None),
      ("name.", None),
    ];
    for (path, expected) in tests {
      assert_eq!(
        root.get_nested(path).map(Node::kind),
        expected,
        "\n path: `{}`\n",
        path
      );
    }
  }

  #[test]
  fn reads_are_repeatable() {
    let root = sample();
    for _ in 0..3 {
      assert_eq!(root.get("name").and_then(Node::as_str), Some("John"));
      assert_eq!(root.get_index(4).and_then(Node::as_str), Some("Jane"));
      assert_eq!(root.get_nested("grades.0").and_then(Node::as_i64), Some(85));
    }
  }

  #[test]
  fn release_consumes_tree() {
    sample().release();
    Node::new().release();
  }

  #[test]
  fn tree_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Node>();
  }
}
