//! The JSON push-down automaton.
//!
//! Each nesting level is a [`Frame`] with its own small state machine. The
//! [`JsonContext`] owns the frames as a stack with the root at the bottom;
//! the top frame is the active one.
//!
//! Opening a container is two steps. First an empty placeholder of the new
//! container's kind is offered to the enclosing frame through its ordinary
//! `add_value`, so the grammar check and its error position happen at the
//! bracket. Then the new frame is pushed. Closing pops the frame and stores
//! the finished collection in the slot the placeholder took.

use crate::{
    engine::ParseContext,
    error::ActionError,
    options::ParserOptions,
    value::{Array, Map, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArrayState {
    Initial,
    Value,
    Comma,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ObjectState {
    Initial,
    Name,
    Colon,
    Value,
    Comma,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Frame {
    Root {
        value: Option<Value>,
    },
    Array {
        items: Array,
        state: ArrayState,
        /// Offset of the `[`.
        start: usize,
    },
    Object {
        members: Map,
        /// Name read but not yet bound to a value.
        pending: Option<String>,
        /// Most recently bound name.
        last_key: Option<String>,
        state: ObjectState,
        /// Offset of the `{`.
        start: usize,
    },
}

fn unexpected(value: &Value) -> ActionError {
    ActionError::value(format!("Unexpected {}", value.kind()))
}

fn unexpected_char(c: char) -> ActionError {
    ActionError::value(format!("Unexpected character '{c}'"))
}

impl Frame {
    fn array(start: usize) -> Self {
        Self::Array {
            items: Array::new(),
            state: ArrayState::Initial,
            start,
        }
    }

    fn object(start: usize) -> Self {
        Self::Object {
            members: Map::new(),
            pending: None,
            last_key: None,
            state: ObjectState::Initial,
            start,
        }
    }

    pub(crate) fn add_value(&mut self, value: Value) -> Result<(), ActionError> {
        match self {
            Self::Root { value: slot } => {
                if slot.is_some() {
                    return Err(unexpected(&value));
                }
                *slot = Some(value);
            }
            Self::Array { items, state, .. } => match state {
                ArrayState::Initial | ArrayState::Comma => {
                    items.push(value);
                    *state = ArrayState::Value;
                }
                ArrayState::Value => return Err(unexpected(&value)),
            },
            Self::Object {
                members,
                pending,
                last_key,
                state,
                ..
            } => match state {
                ObjectState::Initial | ObjectState::Comma => {
                    let name = match value {
                        Value::String(name) => name,
                        other => return Err(unexpected(&other)),
                    };
                    if pending.is_some() {
                        return Err(ActionError::internal("object name already pending"));
                    }
                    *pending = Some(name);
                    *state = ObjectState::Name;
                }
                ObjectState::Colon => {
                    let name = pending
                        .take()
                        .ok_or_else(|| ActionError::internal("object value without a name"))?;
                    members.insert(name.clone(), value);
                    *last_key = Some(name);
                    *state = ObjectState::Value;
                }
                ObjectState::Name | ObjectState::Value => return Err(unexpected(&value)),
            },
        }
        Ok(())
    }

    pub(crate) fn colon(&mut self) -> Result<(), ActionError> {
        match self {
            Self::Object { state, .. } if *state == ObjectState::Name => {
                *state = ObjectState::Colon;
                Ok(())
            }
            _ => Err(unexpected_char(':')),
        }
    }

    pub(crate) fn comma(&mut self) -> Result<(), ActionError> {
        match self {
            Self::Array { state, .. } if *state == ArrayState::Value => {
                *state = ArrayState::Comma;
                Ok(())
            }
            Self::Object { state, .. } if *state == ObjectState::Value => {
                *state = ObjectState::Comma;
                Ok(())
            }
            _ => Err(unexpected_char(',')),
        }
    }

    /// Checks that `]` may end this frame.
    pub(crate) fn close_array(&self) -> Result<(), ActionError> {
        match self {
            Self::Array {
                state: ArrayState::Initial | ArrayState::Value,
                ..
            } => Ok(()),
            _ => Err(unexpected_char(']')),
        }
    }

    /// Checks that `}` may end this frame.
    pub(crate) fn close_object(&self) -> Result<(), ActionError> {
        match self {
            Self::Object {
                state: ObjectState::Initial | ObjectState::Value,
                ..
            } => Ok(()),
            _ => Err(unexpected_char('}')),
        }
    }

    /// Replaces the placeholder most recently added with the finished
    /// container.
    fn fill_nested(&mut self, value: Value) -> Result<(), ActionError> {
        let slot = match self {
            Self::Root { value: slot } => slot.as_mut(),
            Self::Array { items, .. } => items.last_mut(),
            Self::Object {
                members, last_key, ..
            } => last_key.as_ref().and_then(|k| members.get_mut(k)),
        };
        let slot = slot.ok_or_else(|| ActionError::internal("closed container has no slot"))?;
        *slot = value;
        Ok(())
    }

    fn into_value(self) -> Result<Value, ActionError> {
        match self {
            Self::Root { value } => value.ok_or_else(|| ActionError::value("Unexpected end")),
            Self::Array { items, .. } => Ok(Value::Array(items)),
            Self::Object { members, .. } => Ok(Value::Object(members)),
        }
    }

    /// Turns the frame active at the end of input into the parse result.
    pub(crate) fn finalize(self) -> Result<Value, ActionError> {
        match self {
            Self::Root { .. } => self.into_value(),
            Self::Array { start, .. } => Err(ActionError::positioned(start, "Unmatched '['")),
            Self::Object { start, .. } => Err(ActionError::positioned(start, "Unmatched '{'")),
        }
    }
}

/// Parse state of the JSON grammar: a stack of open containers above the
/// root.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonContext {
    frames: Vec<Frame>,
    max_depth: Option<usize>,
}

impl Default for JsonContext {
    fn default() -> Self {
        Self::new(ParserOptions::default().max_depth)
    }
}

impl JsonContext {
    /// A fresh context; `max_depth` bounds the number of open containers.
    #[must_use]
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: vec![Frame::Root { value: None }],
            max_depth,
        }
    }

    /// Number of currently open containers.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    fn active(&mut self) -> Result<&mut Frame, ActionError> {
        self.frames
            .last_mut()
            .ok_or_else(|| ActionError::internal("no active context"))
    }

    pub(crate) fn add_value(&mut self, value: Value) -> Result<(), ActionError> {
        self.active()?.add_value(value)
    }

    pub(crate) fn open_array(&mut self, offset: usize) -> Result<(), ActionError> {
        self.open(Value::Array(Array::new()), Frame::array(offset), offset)
    }

    pub(crate) fn open_object(&mut self, offset: usize) -> Result<(), ActionError> {
        self.open(Value::Object(Map::new()), Frame::object(offset), offset)
    }

    fn open(&mut self, placeholder: Value, frame: Frame, offset: usize) -> Result<(), ActionError> {
        if self.max_depth.is_some_and(|max| self.depth() >= max) {
            return Err(ActionError::positioned(
                offset,
                "Maximum nesting depth exceeded",
            ));
        }
        self.active()?.add_value(placeholder)?;
        self.frames.push(frame);
        Ok(())
    }

    pub(crate) fn colon(&mut self) -> Result<(), ActionError> {
        self.active()?.colon()
    }

    pub(crate) fn comma(&mut self) -> Result<(), ActionError> {
        self.active()?.comma()
    }

    pub(crate) fn close_array(&mut self) -> Result<(), ActionError> {
        self.active()?.close_array()?;
        self.close()
    }

    pub(crate) fn close_object(&mut self) -> Result<(), ActionError> {
        self.active()?.close_object()?;
        self.close()
    }

    fn close(&mut self) -> Result<(), ActionError> {
        let finished = self
            .frames
            .pop()
            .ok_or_else(|| ActionError::internal("no active context"))?
            .into_value()?;
        self.active()?.fill_nested(finished)
    }
}

impl ParseContext for JsonContext {
    type Output = Value;

    fn finalize(mut self) -> Result<Value, ActionError> {
        self.frames
            .pop()
            .ok_or_else(|| ActionError::internal("no active context"))?
            .finalize()
    }
}
