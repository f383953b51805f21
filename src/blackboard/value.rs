//! Type-erased blackboard values.
//!
//! Every memory table stores [`BlackboardValue`]s. The holder boxes any
//! `Send + Sync + 'static` value and remembers its type, so typed reads can
//! check the stored type before handing the value out.

use std::any::{Any, TypeId};
use std::fmt;

use super::error::{BlackboardError, Result};

/// A single value stored under a blackboard key.
///
/// # Example
///
/// ```
/// use agent_blackboard::blackboard::BlackboardValue;
///
/// let value = BlackboardValue::new(42u32);
/// assert!(value.is::<u32>());
/// assert_eq!(value.downcast_ref::<u32>(), Some(&42));
/// assert!(value.try_ref::<String>("hp").is_err());
/// ```
pub struct BlackboardValue {
    value: Box<dyn Any + Send + Sync>,
    type_id: TypeId,
    type_name: &'static str,
    /// Epoch millis when this value was created.
    written_at: i64,
}

impl BlackboardValue {
    /// Box a value for storage.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            value: Box::new(value),
            written_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Check whether the stored value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Borrow the stored value as `T`, if it is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Mutably borrow the stored value as `T`, if it is one.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.value.downcast_mut::<T>()
    }

    /// Borrow the stored value as `T`, reporting a mismatch against `key`.
    pub fn try_ref<T: Any>(&self, key: &str) -> Result<&T> {
        self.value
            .downcast_ref::<T>()
            .ok_or_else(|| BlackboardError::TypeMismatch {
                key: key.to_string(),
                expected: std::any::type_name::<T>(),
                found: self.type_name,
            })
    }

    /// Consume the holder and extract the value as `T`.
    ///
    /// On mismatch the holder is handed back unchanged.
    pub fn downcast<T: Any + Send + Sync>(self) -> std::result::Result<T, Self> {
        let Self {
            value,
            type_id,
            type_name,
            written_at,
        } = self;
        match value.downcast::<T>() {
            Ok(boxed) => Ok(*boxed),
            Err(value) => Err(Self {
                value,
                type_id,
                type_name,
                written_at,
            }),
        }
    }

    /// Name of the stored type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// When the value was created (epoch millis).
    pub fn written_at(&self) -> i64 {
        self.written_at
    }
}

impl fmt::Debug for BlackboardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlackboardValue")
            .field("type_name", &self.type_name)
            .field("written_at", &self.written_at)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Target {
        name: String,
        distance: f32,
    }

    #[test]
    fn test_value_new_and_downcast() {
        let value = BlackboardValue::new(Target {
            name: "orc".into(),
            distance: 3.5,
        });

        assert!(value.is::<Target>());
        assert!(!value.is::<i32>());

        let target = value.downcast_ref::<Target>().unwrap();
        assert_eq!(target.name, "orc");
        assert_eq!(target.distance, 3.5);
    }

    #[test]
    fn test_value_downcast_mut() {
        let mut value = BlackboardValue::new(10i32);
        *value.downcast_mut::<i32>().unwrap() -= 3;
        assert_eq!(value.downcast_ref::<i32>(), Some(&7));
    }

    #[test]
    fn test_value_try_ref_mismatch() {
        let value = BlackboardValue::new(10i32);
        let err = value.try_ref::<String>("hp").unwrap_err();
        match err {
            BlackboardError::TypeMismatch { key, expected, found } => {
                assert_eq!(key, "hp");
                assert_eq!(expected, std::any::type_name::<String>());
                assert_eq!(found, "i32");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_value_consume() {
        let value = BlackboardValue::new(vec![1u8, 2, 3]);
        assert_eq!(value.downcast::<Vec<u8>>().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_value_consume_wrong_type() {
        let value = BlackboardValue::new(42i32);
        let value = value.downcast::<String>().unwrap_err();
        assert!(value.is::<i32>());
        assert_eq!(value.type_name(), "i32");
    }

    #[test]
    fn test_value_written_at() {
        let before = chrono::Utc::now().timestamp_millis();
        let value = BlackboardValue::new("idle");
        assert!(value.written_at() >= before);
    }
}
