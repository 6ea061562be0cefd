//! Post-decode converters for API data.
//!
//! The API reports timestamps as epoch milliseconds (and occasionally as
//! bare ISO strings). Each model type here is an immutable table mapping
//! field names to converter functions; conversion walks the intersection of
//! fields present in the decoded document and fields with a registered
//! converter, rewriting each in place. Arrays convert element-wise.
//!
//! Converted datetimes are re-emitted as RFC 3339 UTC strings with
//! millisecond precision, e.g. `2017-12-29T00:52:30.384Z`. Values that do
//! not look like timestamps are left untouched, so converters are total.

use chrono::{NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde_json::{json, Value};

use crate::format::Converter;

/// A table of field-level conversions for one model type.
struct Conversions {
    fields: &'static [(&'static str, Converter)],
}

impl Conversions {
    const fn new(fields: &'static [(&'static str, Converter)]) -> Self {
        Self { fields }
    }

    /// Converts one document, or each element of an array of documents.
    fn convert(&self, value: Value) -> Value {
        match value {
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|item| self.convert_one(item)).collect())
            }
            other => self.convert_one(other),
        }
    }

    fn convert_one(&self, value: Value) -> Value {
        let Value::Object(mut map) = value else {
            return value;
        };
        for (field, convert) in self.fields {
            if let Some(slot) = map.get_mut(*field) {
                let current = slot.take();
                *slot = convert(current);
            }
        }
        Value::Object(map)
    }

    /// Converts every value of a top-level object (e.g. the tournament
    /// listing keyed by `created`/`started`/`finished`).
    fn convert_values(&self, value: Value) -> Value {
        let Value::Object(mut map) = value else {
            return value;
        };
        for (_, slot) in map.iter_mut() {
            let current = slot.take();
            *slot = self.convert(current);
        }
        Value::Object(map)
    }
}

fn datetime_from_millis(value: Value) -> Value {
    match value
        .as_i64()
        .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
    {
        Some(dt) => Value::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => value,
    }
}

fn datetime_from_str(value: Value) -> Value {
    let Value::String(text) = &value else {
        return value;
    };
    match NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.fZ") {
        Ok(naive) => Value::String(
            Utc.from_utc_datetime(&naive)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        Err(_) => value,
    }
}

/// Applies `datetime_from_millis` to the named keys of a nested object.
fn convert_keys(value: Value, keys: &[&str]) -> Value {
    let Value::Object(mut map) = value else {
        return value;
    };
    for key in keys {
        if let Some(slot) = map.get_mut(*key) {
            let current = slot.take();
            *slot = datetime_from_millis(current);
        }
    }
    Value::Object(map)
}

fn convert_interval(value: Value) -> Value {
    convert_keys(value, &["start", "end"])
}

fn convert_broadcast_times(value: Value) -> Value {
    convert_keys(value, &["startedAt", "startsAt"])
}

/// Rewrites rating-history points from positional `[year, month, day,
/// rating]` arrays into keyed objects.
fn convert_points(value: Value) -> Value {
    let Value::Array(entries) = value else {
        return value;
    };
    Value::Array(
        entries
            .into_iter()
            .map(|entry| match entry {
                Value::Array(parts) if parts.len() == 4 => json!({
                    "year": parts[0],
                    "month": parts[1],
                    "day": parts[2],
                    "rating": parts[3],
                }),
                other => other,
            })
            .collect(),
    )
}

const ACCOUNT: Conversions = Conversions::new(&[
    ("createdAt", datetime_from_millis),
    ("seenAt", datetime_from_millis),
]);

const ACTIVITY: Conversions = Conversions::new(&[("interval", convert_interval)]);

const GAME: Conversions = Conversions::new(&[
    ("createdAt", datetime_from_millis),
    ("lastMoveAt", datetime_from_millis),
]);

const GAME_STATE: Conversions = Conversions::new(&[
    ("createdAt", datetime_from_millis),
    ("wtime", datetime_from_millis),
    ("btime", datetime_from_millis),
    ("winc", datetime_from_millis),
    ("binc", datetime_from_millis),
]);

const TOURNAMENT: Conversions = Conversions::new(&[("startsAt", datetime_from_str)]);

const TOURNAMENTS: Conversions = Conversions::new(&[
    ("startsAt", datetime_from_millis),
    ("finishesAt", datetime_from_millis),
]);

const BROADCAST: Conversions = Conversions::new(&[("broadcast", convert_broadcast_times)]);

const RATING_HISTORY: Conversions = Conversions::new(&[("points", convert_points)]);

const PUZZLE_ACTIVITY: Conversions = Conversions::new(&[("date", datetime_from_millis)]);

/// Account timestamps (`createdAt`, `seenAt`).
pub fn account(value: Value) -> Value {
    ACCOUNT.convert(value)
}

/// User timestamps; same shape as accounts.
pub fn user(value: Value) -> Value {
    ACCOUNT.convert(value)
}

/// Activity feed entries (`interval.start`, `interval.end`).
pub fn activity(value: Value) -> Value {
    ACTIVITY.convert(value)
}

/// Game timestamps (`createdAt`, `lastMoveAt`).
pub fn game(value: Value) -> Value {
    GAME.convert(value)
}

/// Board/bot game-state clocks and creation time.
pub fn game_state(value: Value) -> Value {
    GAME_STATE.convert(value)
}

/// Single tournament (`startsAt` as an ISO string).
pub fn tournament(value: Value) -> Value {
    TOURNAMENT.convert(value)
}

/// Tournament listing: `created`/`started`/`finished` arrays, each entry
/// with millis timestamps.
pub fn tournaments(value: Value) -> Value {
    TOURNAMENTS.convert_values(value)
}

/// Broadcast metadata (`broadcast.startedAt`, `broadcast.startsAt`).
pub fn broadcast(value: Value) -> Value {
    BROADCAST.convert(value)
}

/// Rating history (`points` entries become keyed objects).
pub fn rating_history(value: Value) -> Value {
    RATING_HISTORY.convert(value)
}

/// Puzzle activity entries (`date`).
pub fn puzzle_activity(value: Value) -> Value {
    PUZZLE_ACTIVITY.convert(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_to_rfc3339() {
        assert_eq!(
            datetime_from_millis(json!(1000)),
            json!("1970-01-01T00:00:01.000Z")
        );
        assert_eq!(
            datetime_from_millis(json!(1514505150384_i64)),
            json!("2017-12-28T23:52:30.384Z")
        );
    }

    #[test]
    fn test_non_integer_left_untouched() {
        assert_eq!(datetime_from_millis(json!("soon")), json!("soon"));
        assert_eq!(datetime_from_millis(Value::Null), Value::Null);
    }

    #[test]
    fn test_iso_string_normalized() {
        assert_eq!(
            datetime_from_str(json!("2020-05-17T12:30:45.123Z")),
            json!("2020-05-17T12:30:45.123Z")
        );
        assert_eq!(datetime_from_str(json!("not a date")), json!("not a date"));
    }

    #[test]
    fn test_account_conversion() {
        let converted = account(json!({
            "username": "alice",
            "createdAt": 1000,
            "seenAt": 2000,
            "rating": 1500,
        }));
        assert_eq!(converted["createdAt"], json!("1970-01-01T00:00:01.000Z"));
        assert_eq!(converted["seenAt"], json!("1970-01-01T00:00:02.000Z"));
        assert_eq!(converted["rating"], json!(1500));
    }

    #[test]
    fn test_absent_fields_are_normal() {
        let converted = user(json!({"username": "bob"}));
        assert_eq!(converted, json!({"username": "bob"}));
    }

    #[test]
    fn test_array_converts_elementwise() {
        let converted = user(json!([
            {"username": "alice", "createdAt": 1000},
            {"username": "bob", "createdAt": 2000},
        ]));
        assert_eq!(converted[0]["createdAt"], json!("1970-01-01T00:00:01.000Z"));
        assert_eq!(converted[1]["createdAt"], json!("1970-01-01T00:00:02.000Z"));
    }

    #[test]
    fn test_activity_interval() {
        let converted = activity(json!([
            {"interval": {"start": 1000, "end": 2000}, "games": {}},
        ]));
        assert_eq!(
            converted[0]["interval"],
            json!({"start": "1970-01-01T00:00:01.000Z", "end": "1970-01-01T00:00:02.000Z"})
        );
    }

    #[test]
    fn test_tournaments_listing() {
        let converted = tournaments(json!({
            "created": [{"id": "a", "startsAt": 1000}],
            "finished": [{"id": "b", "finishesAt": 2000}],
        }));
        assert_eq!(
            converted["created"][0]["startsAt"],
            json!("1970-01-01T00:00:01.000Z")
        );
        assert_eq!(
            converted["finished"][0]["finishesAt"],
            json!("1970-01-01T00:00:02.000Z")
        );
    }

    #[test]
    fn test_broadcast_nested() {
        let converted = broadcast(json!({
            "broadcast": {"id": "x", "startsAt": 1000},
            "url": "https://example.org/broadcast/x",
        }));
        assert_eq!(
            converted["broadcast"]["startsAt"],
            json!("1970-01-01T00:00:01.000Z")
        );
    }

    #[test]
    fn test_rating_history_points() {
        let converted = rating_history(json!([
            {"name": "Blitz", "points": [[2017, 3, 4, 1500], [2017, 3, 5, 1540]]},
        ]));
        assert_eq!(
            converted[0]["points"][0],
            json!({"year": 2017, "month": 3, "day": 4, "rating": 1500})
        );
    }
}
