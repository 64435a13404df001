//! Recurrence identifiers and derivation of virtual recurrence instances.

use chrono::{NaiveDateTime, TimeDelta, TimeZone, Utc};
use rrule::{RRule, RRuleSet, Tz, Unvalidated};

use super::timezone::{ConversionError, TimeZoneResolver, convert_to_utc_lenient};
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::{
    Component, Date, DateTime, DateTimeForm, ICalendar, Property, PropertyName, Value,
};

/// Properties that define a recurrence set and never appear on an instance.
const RECURRENCE_SET_PROPERTIES: &[PropertyName] = &[
    PropertyName::Rrule,
    PropertyName::Exrule,
    PropertyName::Rdate,
    PropertyName::Exdate,
];

/// Instants closer than this to a requested identifier count as that identifier.
const OCCURRENCE_TOLERANCE: TimeDelta = TimeDelta::seconds(1);

/// ## Summary
/// Converts a single DATE-TIME to UTC.
///
/// Floating values are read as UTC. Zoned values whose TZID cannot be
/// resolved are also read as UTC so that both sides of a comparison agree.
fn datetime_to_utc(dt: &DateTime, resolver: &mut TimeZoneResolver) -> Option<chrono::DateTime<Utc>> {
    let naive = dt.to_naive()?;
    match &dt.form {
        DateTimeForm::Utc | DateTimeForm::Floating => Some(naive.and_utc()),
        DateTimeForm::Zoned { tzid } => match convert_to_utc_lenient(naive, tzid, resolver) {
            Ok(utc) => Some(utc),
            Err(ConversionError::UnknownTimezone(_)) => {
                tracing::debug!(tzid, "Unresolvable TZID, reading value as UTC");
                Some(naive.and_utc())
            }
            Err(ConversionError::NonExistentTime(detail)) => {
                tracing::warn!(detail, "Local time could not be converted");
                None
            }
        },
    }
}

/// ## Summary
/// Converts a DATE or DATE-TIME value to a UTC instant.
///
/// DATE values map to midnight UTC. Returns `None` for other value types
/// and for out-of-range fields.
#[must_use]
pub fn value_to_utc(
    value: &Value,
    resolver: &mut TimeZoneResolver,
) -> Option<chrono::DateTime<Utc>> {
    match value {
        Value::DateTime(dt) => datetime_to_utc(dt, resolver),
        Value::Date(date) => Some(date.to_naive()?.and_hms_opt(0, 0, 0)?.and_utc()),
        _ => None,
    }
}

/// Wall-clock value of a DATE or DATE-TIME, with DATE at midnight.
fn local_naive(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::DateTime(dt) => dt.to_naive(),
        Value::Date(date) => date.to_naive()?.and_hms_opt(0, 0, 0),
        _ => None,
    }
}

/// Returns `prop` with its value moved to the wall-clock time `naive`,
/// keeping its form and parameters.
fn retimed(prop: &Property, naive: NaiveDateTime) -> Option<Property> {
    let value = match &prop.value {
        Value::DateTime(dt) => Value::DateTime(DateTime::from_naive(naive, dt.form.clone())?),
        Value::Date(_) => Value::Date(Date::from_naive(naive.date())?),
        _ => return None,
    };
    let raw_value = match &value {
        Value::DateTime(dt) => dt.to_string(),
        Value::Date(date) => date.to_string(),
        _ => return None,
    };
    Some(Property {
        value,
        raw_value,
        ..prop.clone()
    })
}

/// Time zone in which a master's recurrence set is expanded.
fn expansion_zone(dtstart: &Property, resolver: &mut TimeZoneResolver) -> Tz {
    let Some(tzid) = dtstart.as_datetime().and_then(DateTime::tzid) else {
        return Tz::UTC;
    };
    match resolver.resolve(tzid) {
        Ok(tz) => Tz::Tz(tz),
        Err(err) => {
            tracing::debug!(%err, "Expanding recurrence set in UTC");
            Tz::UTC
        }
    }
}

/// Places a wall-clock time in `tz`, moving times in a DST gap forward.
fn in_zone(naive: NaiveDateTime, tz: Tz) -> Option<chrono::DateTime<Tz>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + TimeDelta::hours(1))).earliest())
}

/// Collects every instant listed by the named property (EXDATE or RDATE).
fn listed_instants(
    component: &Component,
    name: &str,
    tz: Tz,
    resolver: &mut TimeZoneResolver,
) -> Vec<chrono::DateTime<Tz>> {
    let mut instants = Vec::new();
    for prop in component.get_properties(name) {
        let values: Vec<Value> = match &prop.value {
            Value::DateTimeList(dts) => dts.iter().cloned().map(Value::DateTime).collect(),
            Value::DateList(dates) => dates.iter().copied().map(Value::Date).collect(),
            other => vec![other.clone()],
        };
        for value in &values {
            match value_to_utc(value, resolver) {
                Some(utc) => instants.push(utc.with_timezone(&tz)),
                None => tracing::debug!(name, raw = %prop.raw_value, "Skipping unusable date"),
            }
        }
    }
    instants
}

/// ## Summary
/// Parses and validates every rule of the named property (RRULE or EXRULE)
/// against DTSTART.
///
/// ## Errors
/// Returns an error if a rule does not parse or is invalid for DTSTART.
fn validated_rules(
    master: &Component,
    name: &str,
    dt_start: chrono::DateTime<Tz>,
) -> RfcResult<Vec<RRule>> {
    master
        .get_properties(name)
        .into_iter()
        .filter_map(|p| p.value.as_recur())
        .map(|text| Ok(text.parse::<RRule<Unvalidated>>()?.validate(dt_start)?))
        .collect()
}

/// Whether `set` produces an instance at `rid`.
fn set_contains(set: RRuleSet, rid: chrono::DateTime<Utc>, tz: Tz) -> bool {
    let target = rid.with_timezone(&tz);
    set.after(target - OCCURRENCE_TOLERANCE)
        .before(target + OCCURRENCE_TOLERANCE)
        .all(2)
        .dates
        .iter()
        .any(|dt| dt.with_timezone(&Utc) == rid)
}

/// ## Summary
/// Checks whether `rid` is an occurrence of the master's recurrence set.
///
/// DTSTART always counts as the first occurrence unless excluded by EXDATE
/// or EXRULE.
///
/// ## Errors
/// Returns an error if a recurrence rule cannot be built against DTSTART.
fn is_occurrence(
    master: &Component,
    dtstart: &Property,
    rid: chrono::DateTime<Utc>,
    resolver: &mut TimeZoneResolver,
) -> RfcResult<bool> {
    let tz = expansion_zone(dtstart, resolver);
    let dt_start = local_naive(&dtstart.value)
        .and_then(|naive| in_zone(naive, tz))
        .ok_or_else(|| RfcError::ValidationError(format!("unusable DTSTART {}", dtstart.raw_value)))?;

    let exdates = listed_instants(master, "EXDATE", tz, resolver);
    if exdates.iter().any(|ex| ex.with_timezone(&Utc) == rid) {
        return Ok(false);
    }

    let exrules = validated_rules(master, "EXRULE", dt_start)?;
    if !exrules.is_empty() && set_contains(RRuleSet::new(dt_start).set_rrules(exrules), rid, tz) {
        tracing::trace!("Occurrence excluded by EXRULE");
        return Ok(false);
    }

    if dt_start.with_timezone(&Utc) == rid {
        return Ok(true);
    }

    let rrule_set = RRuleSet::new(dt_start)
        .set_rrules(validated_rules(master, "RRULE", dt_start)?)
        .set_rdates(listed_instants(master, "RDATE", tz, resolver))
        .set_exdates(exdates);

    Ok(set_contains(rrule_set, rid, tz))
}

impl Component {
    /// ## Summary
    /// Returns the RECURRENCE-ID of this component as a UTC instant.
    ///
    /// Returns `None` for masters and for identifiers that are not DATE or
    /// DATE-TIME values.
    pub fn recurrence_id_utc(
        &self,
        resolver: &mut TimeZoneResolver,
    ) -> Option<chrono::DateTime<Utc>> {
        let rid = self.get_property("RECURRENCE-ID")?;
        value_to_utc(&rid.value, resolver)
    }
}

impl ICalendar {
    /// ## Summary
    /// Derives the virtual occurrence of the recurrence master at `rid`.
    ///
    /// The instance is a copy of the master without RRULE, EXRULE, RDATE or
    /// EXDATE, with DTSTART moved to the occurrence and a RECURRENCE-ID in
    /// the same form as the master's DTSTART. DTEND and DUE move with it.
    ///
    /// Returns `None` when there is no recurring master or `rid` is not one
    /// of its occurrences.
    #[tracing::instrument(skip(self, resolver))]
    pub fn derive_instance(
        &self,
        rid: chrono::DateTime<Utc>,
        resolver: &mut TimeZoneResolver,
    ) -> Option<Component> {
        let Some(master) = self.master_component() else {
            tracing::debug!("No master component to derive from");
            return None;
        };
        if !master.has_property(&PropertyName::Rrule) && !master.has_property(&PropertyName::Rdate)
        {
            tracing::debug!("Master component does not recur");
            return None;
        }
        let dtstart = master.get_property("DTSTART")?;

        match is_occurrence(master, dtstart, rid, resolver) {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!("Not an occurrence of the master");
                return None;
            }
            Err(err) => {
                tracing::warn!(%err, "Could not expand recurrence set");
                return None;
            }
        }

        let tz = expansion_zone(dtstart, resolver);
        let occurrence = rid.with_timezone(&tz).naive_local();
        let offset = occurrence - local_naive(&dtstart.value)?;

        let mut instance = master.clone();
        for name in RECURRENCE_SET_PROPERTIES {
            instance.remove_properties(name);
        }

        let start = retimed(dtstart, occurrence)?;
        let mut recurrence_id = start.clone();
        recurrence_id.name = PropertyName::RecurrenceId.as_str().to_string();
        instance.replace_property(start);

        for prop in &mut instance.properties {
            if prop.is(&PropertyName::Dtend) || prop.is(&PropertyName::Due) {
                let shifted = local_naive(&prop.value).and_then(|end| retimed(prop, end + offset));
                if let Some(shifted) = shifted {
                    *prop = shifted;
                }
            }
        }

        instance.add_property(recurrence_id);
        tracing::trace!(uid = ?instance.uid(), "Derived recurrence instance");
        Some(instance)
    }
}
