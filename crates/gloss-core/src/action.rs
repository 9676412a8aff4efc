use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::record::{Member, Record};
use crate::value::{self, FieldValue, ValueType};

const SECONDS_PER_HOUR: f64 = 3_600.0;
const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// A scheduled action entered into the system.
///
/// Field names follow the external document format (`ID`, `Type`, ...).
/// `HoursRemaining` is derived and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Action {
    #[serde(rename = "ID")]
    id: i32,
    #[serde(rename = "Type")]
    action_type: i32,
    #[serde(rename = "Scheduled")]
    scheduled: Option<NaiveDateTime>,
    #[serde(rename = "Entered")]
    entered: Option<NaiveDateTime>,
    #[serde(rename = "Comment", default)]
    comment: String,
}

impl Action {
    #[must_use]
    pub const fn id(&self) -> i32 {
        self.id
    }

    pub const fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    #[must_use]
    pub const fn action_type(&self) -> i32 {
        self.action_type
    }

    pub const fn set_action_type(&mut self, action_type: i32) {
        self.action_type = action_type;
    }

    #[must_use]
    pub const fn scheduled(&self) -> Option<NaiveDateTime> {
        self.scheduled
    }

    pub const fn set_scheduled(&mut self, scheduled: Option<NaiveDateTime>) {
        self.scheduled = scheduled;
    }

    #[must_use]
    pub const fn entered(&self) -> Option<NaiveDateTime> {
        self.entered
    }

    pub const fn set_entered(&mut self, entered: Option<NaiveDateTime>) {
        self.entered = entered;
    }

    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    /// Hours from `Entered` to `Scheduled`, or `None` unless both are set.
    ///
    /// Negative when the action was scheduled before it was entered.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hours_remaining(&self) -> Option<f64> {
        let (scheduled, entered) = (self.scheduled?, self.entered?);
        let delta = scheduled - entered;
        let seconds = delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / NANOS_PER_SECOND;
        Some(seconds / SECONDS_PER_HOUR)
    }
}

impl Record for Action {
    const TYPE_NAME: &'static str = "Action";

    fn members() -> Vec<Member<Self>> {
        vec![
            Member::<Self>::read_write(
                "ID",
                ValueType::Int,
                false,
                |a| Some(FieldValue::from(a.id())),
                |a, v| {
                    a.set_id(value::required("ID", v)?);
                    Ok(())
                },
            ),
            Member::<Self>::read_write(
                "Type",
                ValueType::Int,
                false,
                |a| Some(FieldValue::from(a.action_type())),
                |a, v| {
                    a.set_action_type(value::required("Type", v)?);
                    Ok(())
                },
            ),
            Member::<Self>::read_write(
                "Scheduled",
                ValueType::Timestamp,
                true,
                |a| a.scheduled().map(FieldValue::from),
                |a, v| {
                    a.set_scheduled(value::optional("Scheduled", v)?);
                    Ok(())
                },
            ),
            Member::<Self>::read_write(
                "Entered",
                ValueType::Timestamp,
                true,
                |a| a.entered().map(FieldValue::from),
                |a, v| {
                    a.set_entered(value::optional("Entered", v)?);
                    Ok(())
                },
            ),
            Member::<Self>::read_write(
                "Comment",
                ValueType::Text,
                false,
                |a| Some(FieldValue::from(a.comment())),
                |a, v| {
                    a.set_comment(value::required::<String>("Comment", v)?);
                    Ok(())
                },
            ),
            Member::<Self>::read_only("HoursRemaining", ValueType::Real, true, |a| {
                a.hours_remaining().map(FieldValue::from)
            }),
        ]
    }
}
