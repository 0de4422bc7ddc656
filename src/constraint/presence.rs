//! Presence constraints: is the subject's value there at all.

use super::{Constraint, IntoConstraint, Predicate};
use crate::subject::Subject;
use async_trait::async_trait;
use std::fmt::Debug;
use std::marker::PhantomData;

/// Present/absent constraint family.
#[derive(Debug, Clone, Copy)]
pub struct Presence<T> {
    expect_present: bool,
    _marker: PhantomData<fn() -> T>,
}

/// Expect the subject to hold a value.
pub fn is_present<T>() -> Presence<T> {
    Presence {
        expect_present: true,
        _marker: PhantomData,
    }
}

/// Expect the subject to hold no value.
pub fn is_absent<T>() -> Presence<T> {
    Presence {
        expect_present: false,
        _marker: PhantomData,
    }
}

#[async_trait]
impl<T> Predicate<T> for Presence<T>
where
    T: Debug + Send + Sync,
{
    async fn holds(&self, subject: &Subject<T>) -> bool {
        subject.has_value() == self.expect_present
    }

    fn describe(&self, subject: &Subject<T>, negated: bool) -> String {
        let wanted = if self.expect_present == negated {
            "absent"
        } else {
            "present"
        };
        match subject.value() {
            Some(value) => format!("to be {wanted}, but was {value:?}"),
            None => format!("to be {wanted}, but was absent"),
        }
    }
}

impl<T> IntoConstraint<T> for Presence<T>
where
    T: Debug + Send + Sync + 'static,
{
    fn into_constraint(self) -> Constraint<T> {
        Constraint::new(self)
    }
}
