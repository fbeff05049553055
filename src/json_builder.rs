//! Incremental construction of a [`serde_json::Value`].
//!
//! The builder tracks a stack of open containers and checks every call
//! against the container on top of it:
//!
//! - at the top level a single value may be written;
//! - inside an array any number of values may be written;
//! - inside a dictionary a `key` must precede each value.
//!
//! `build` fails until every container has been closed.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    #[error("key {0:?} is only allowed directly inside a dictionary")]
    UnexpectedKey(String),

    #[error("key {pending:?} is still waiting for its value, cannot start key {key:?}")]
    KeyPending { pending: String, key: String },

    #[error("a value inside a dictionary needs a key first")]
    MissingKey,

    #[error("the document already has a root value")]
    DocumentComplete,

    #[error("{0} does not match the innermost open container")]
    MismatchedEnd(&'static str),

    #[error("key {0:?} was never given a value")]
    DanglingKey(String),

    #[error("cannot build with {0} container(s) still open")]
    Unclosed(usize),

    #[error("cannot build an empty document")]
    Empty,
}

#[derive(Debug)]
enum Frame {
    Array(Vec<Value>),
    Dict {
        map: Map<String, Value>,
        pending_key: Option<String>,
    },
}

#[derive(Debug, Default)]
pub struct Builder {
    root: Option<Value>,
    stack: Vec<Frame>,
}

impl Builder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn key(&mut self, key: impl Into<String>) -> Result<&mut Self, BuilderError> {
        let key = key.into();
        let Some(Frame::Dict { pending_key, .. }) = self.stack.last_mut() else {
            return Err(BuilderError::UnexpectedKey(key));
        };
        if let Some(pending) = pending_key {
            return Err(BuilderError::KeyPending {
                pending: pending.clone(),
                key,
            });
        }
        *pending_key = Some(key);
        Ok(self)
    }

    pub fn value(&mut self, value: impl Into<Value>) -> Result<&mut Self, BuilderError> {
        self.ensure_value_allowed()?;
        self.attach(value.into());
        Ok(self)
    }

    pub fn start_dict(&mut self) -> Result<&mut Self, BuilderError> {
        self.ensure_value_allowed()?;
        self.stack.push(Frame::Dict {
            map: Map::new(),
            pending_key: None,
        });
        Ok(self)
    }

    pub fn end_dict(&mut self) -> Result<&mut Self, BuilderError> {
        match self.stack.pop() {
            Some(Frame::Dict {
                map,
                pending_key: None,
            }) => {
                self.attach(Value::Object(map));
                Ok(self)
            }
            Some(Frame::Dict {
                map,
                pending_key: Some(key),
            }) => {
                self.stack.push(Frame::Dict {
                    map,
                    pending_key: Some(key.clone()),
                });
                Err(BuilderError::DanglingKey(key))
            }
            other => {
                self.stack.extend(other);
                Err(BuilderError::MismatchedEnd("end_dict"))
            }
        }
    }

    pub fn start_array(&mut self) -> Result<&mut Self, BuilderError> {
        self.ensure_value_allowed()?;
        self.stack.push(Frame::Array(Vec::new()));
        Ok(self)
    }

    pub fn end_array(&mut self) -> Result<&mut Self, BuilderError> {
        match self.stack.pop() {
            Some(Frame::Array(items)) => {
                self.attach(Value::Array(items));
                Ok(self)
            }
            other => {
                self.stack.extend(other);
                Err(BuilderError::MismatchedEnd("end_array"))
            }
        }
    }

    /// Takes the finished document, leaving the builder empty.
    pub fn build(&mut self) -> Result<Value, BuilderError> {
        if !self.stack.is_empty() {
            return Err(BuilderError::Unclosed(self.stack.len()));
        }
        self.root.take().ok_or(BuilderError::Empty)
    }

    fn ensure_value_allowed(&self) -> Result<(), BuilderError> {
        match self.stack.last() {
            None if self.root.is_some() => Err(BuilderError::DocumentComplete),
            Some(Frame::Dict {
                pending_key: None, ..
            }) => Err(BuilderError::MissingKey),
            _ => Ok(()),
        }
    }

    // callers have already checked `ensure_value_allowed`
    fn attach(&mut self, value: Value) {
        match self.stack.last_mut() {
            None => self.root = Some(value),
            Some(Frame::Array(items)) => items.push(value),
            Some(Frame::Dict { map, pending_key }) => {
                if let Some(key) = pending_key.take() {
                    map.insert(key, value);
                }
            }
        }
    }
}
