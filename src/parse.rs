use crate::alloc::{Alloc, ParseOptions};
use crate::error::{Error, Result};
use crate::node::{Node, Value};
use nom::{
  bytes::complete::{tag, take_while1},
  character::complete::{char, multispace0},
  IResult,
};
use std::io::Read;

type Scan<'a, O> = IResult<&'a [u8], O>;

/// Parses one JSON document with the default [`ParseOptions`].
pub fn parse(text: impl AsRef<[u8]>) -> Result<Node> {
  parse_with(text, &ParseOptions::default())
}

/// Parses one JSON document. Bytes after the root value are not inspected.
pub fn parse_with(text: impl AsRef<[u8]>, options: &ParseOptions) -> Result<Node> {
  let mut parser = Parser::new(text.as_ref(), options);
  let node = parser.value()?;
  tracing::trace!(consumed = parser.pos, kind = ?node.kind(), "parsed document");
  Ok(node)
}

/// Reads `reader` to the end, then parses what was read.
pub fn parse_reader(mut reader: impl Read, options: &ParseOptions) -> Result<Node> {
  let mut buf = Vec::new();
  reader.read_to_end(&mut buf)?;
  parse_with(&buf, options)
}

struct Parser<'a> {
  input: &'a [u8],
  pos: usize,
  alloc: Alloc,
  depth: usize,
  max_depth: usize,
}

impl<'a> Parser<'a> {
  fn new(input: &'a [u8], options: &ParseOptions) -> Self {
    Self {
      input,
      pos: 0,
      alloc: Alloc::new(options),
      depth: 0,
      max_depth: options.max_depth,
    }
  }

  fn peek(&self) -> Option<u8> {
    self.input.get(self.pos).copied()
  }

  /// Runs a token scanner at the cursor and advances past what it consumed.
  fn scan<O>(&mut self, mut scanner: impl FnMut(&'a [u8]) -> Scan<'a, O>) -> Option<O> {
    match scanner(&self.input[self.pos..]) {
      Ok((rest, out)) => {
        self.pos = self.input.len() - rest.len();
        Some(out)
      }
      Err(_) => None,
    }
  }

  fn skip_ws(&mut self) {
    self.scan(multispace0);
  }

  fn eat(&mut self, c: char) -> bool {
    self.scan(char(c)).is_some()
  }

  fn fail(&self, reason: &str) -> Error {
    tracing::debug!(offset = self.pos, reason, "invalid JSON");
    Error::syntax()
  }

  fn value(&mut self) -> Result<Node> {
    self.skip_ws();
    match self.peek() {
      Some(b'{') => self.object(),
      Some(b'[') => self.array(),
      Some(b'"') => {
        let mut node = self.alloc.node()?;
        node.value = Value::String(self.string()?);
        Ok(node)
      }
      Some(b't') => self.literal(b"true", Value::Bool(true)),
      Some(b'f') => self.literal(b"false", Value::Bool(false)),
      Some(b'n') => self.literal(b"null", Value::Null),
      Some(b) if b == b'-' || b.is_ascii_digit() => self.number(),
      Some(_) => Err(self.fail("unexpected byte")),
      None => Err(self.fail("unexpected end of input")),
    }
  }

  fn object(&mut self) -> Result<Node> {
    self.descend()?;
    let mut node = self.alloc.node()?;
    let mut children = Vec::new();
    self.eat('{');
    self.skip_ws();
    if !self.eat('}') {
      loop {
        if self.peek() != Some(b'"') {
          return Err(self.fail("expected object key"));
        }
        let key = self.string()?;
        self.skip_ws();
        if !self.eat(':') {
          return Err(self.fail("expected `:`"));
        }
        let mut child = self.value()?;
        child.key = Some(key);
        self.alloc.push(&mut children, child)?;
        self.skip_ws();
        if self.eat('}') {
          break;
        }
        if !self.eat(',') {
          return Err(self.fail("expected `,` or `}`"));
        }
        self.skip_ws();
      }
    }
    self.depth -= 1;
    node.value = Value::Object(children);
    Ok(node)
  }

  fn array(&mut self) -> Result<Node> {
    self.descend()?;
    let mut node = self.alloc.node()?;
    let mut children = Vec::new();
    self.eat('[');
    self.skip_ws();
    if !self.eat(']') {
      loop {
        let child = self.value()?;
        self.alloc.push(&mut children, child)?;
        self.skip_ws();
        if self.eat(']') {
          break;
        }
        // the next value skips its own leading whitespace
        if !self.eat(',') {
          return Err(self.fail("expected `,` or `]`"));
        }
      }
    }
    self.depth -= 1;
    node.value = Value::Array(children);
    Ok(node)
  }

  fn descend(&mut self) -> Result<()> {
    if self.depth >= self.max_depth {
      tracing::debug!(offset = self.pos, depth = self.depth, "nesting limit reached");
      return Err(Error::out_of_memory());
    }
    self.depth += 1;
    Ok(())
  }

  /// Returns the raw bytes between the quotes. Escapes are only honoured far
  /// enough to keep `\"` from closing the string; they are not decoded.
  fn string(&mut self) -> Result<String> {
    let input = self.input;
    let start = self.pos + 1;
    let mut escape = false;
    for (i, &b) in input[start..].iter().enumerate() {
      if escape {
        escape = false;
      } else if b == b'\\' {
        escape = true;
      } else if b == b'"' {
        self.pos = start + i + 1;
        return self.alloc.text(&input[start..start + i]);
      }
    }
    self.pos = input.len();
    Err(self.fail("unterminated string"))
  }

  fn literal(&mut self, spelling: &'static [u8], value: Value) -> Result<Node> {
    if self.scan(tag(spelling)).is_none() {
      return Err(self.fail("unknown literal"));
    }
    let mut node = self.alloc.node()?;
    node.value = value;
    Ok(node)
  }

  /// Greedy scan over the number byte class, then a strict conversion.
  fn number(&mut self) -> Result<Node> {
    let start = self.pos;
    let digits = self
      .scan(take_while1(|b: u8| b.is_ascii_digit() || b"-+eE.".contains(&b)))
      .unwrap_or_default();
    // the byte class is ASCII only
    let text = std::str::from_utf8(digits).unwrap_or_default();
    let value = if digits.iter().any(|b| b"eE.".contains(b)) {
      text
        .parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
        .map(Value::Double)
    } else {
      text.parse::<i64>().ok().map(Value::Integer)
    };
    match value {
      Some(value) => {
        let mut node = self.alloc.node()?;
        node.value = value;
        Ok(node)
      }
      None => {
        self.pos = start;
        Err(self.fail("malformed number"))
      }
    }
  }
}
