/*!
Implementations of [`Value`] for primitive, standard library, and file handle
types
 */

use std::{collections::VecDeque, path::PathBuf};

use joinery::JoinableIterator;

use crate::{
    errors::ConversionError,
    handle::{ReadHandle, WriteHandle},
    value::{Value, ValueKind},
};

/// The accepted spellings of a boolean
fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl Value for bool {
    fn set(&mut self, text: &str) -> Result<(), ConversionError> {
        *self = parse_bool(text).ok_or_else(|| ConversionError::NotABool {
            text: text.to_owned(),
        })?;

        Ok(())
    }

    fn render(&self) -> String {
        self.to_string()
    }

    #[inline]
    fn kind(&self) -> ValueKind {
        ValueKind::Switch
    }
}

macro_rules! parsed {
    ($error:ident: $($type:ident)*) => {
        $(
            impl Value for $type {
                fn set(&mut self, text: &str) -> Result<(), ConversionError> {
                    *self = text.parse().map_err(|source| ConversionError::$error {
                        text: text.to_owned(),
                        source,
                    })?;

                    Ok(())
                }

                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

parsed! { NotAnInt: u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize }
parsed! { NotAFloat: f32 f64 }

impl Value for String {
    fn set(&mut self, text: &str) -> Result<(), ConversionError> {
        text.clone_into(self);
        Ok(())
    }

    fn render(&self) -> String {
        self.clone()
    }
}

impl Value for PathBuf {
    fn set(&mut self, text: &str) -> Result<(), ConversionError> {
        *self = PathBuf::from(text);
        Ok(())
    }

    fn render(&self) -> String {
        self.display().to_string()
    }
}

impl Value for ReadHandle {
    fn set(&mut self, text: &str) -> Result<(), ConversionError> {
        *self = ReadHandle::open(text)?;
        Ok(())
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl Value for WriteHandle {
    fn set(&mut self, text: &str) -> Result<(), ConversionError> {
        *self = WriteHandle::create(text)?;
        Ok(())
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

// Each `set` converts a fresh element and appends it. A failed conversion
// leaves the list untouched.
macro_rules! collections {
    ($($type:ident .$insert:ident),+ $(,)?) => {
        $(
            impl<T> Value for $type<T>
            where
                T: Value + Default,
            {
                fn set(&mut self, text: &str) -> Result<(), ConversionError> {
                    let mut element = T::default();
                    element.set(text)?;
                    self.$insert(element);
                    Ok(())
                }

                fn render(&self) -> String {
                    format!("[{}]", self.iter().map(Value::render).join_with(", "))
                }

                #[inline]
                fn kind(&self) -> ValueKind {
                    ValueKind::List
                }

                #[inline]
                fn len(&self) -> Option<usize> {
                    Some(<$type<T>>::len(self))
                }
            }
        )+
    };
}

collections! {
    Vec.push,
    VecDeque.push_back,
}
