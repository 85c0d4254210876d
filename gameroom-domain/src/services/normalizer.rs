// Record normalizer
// Turns raw export collections into typed records. Wrapped scalars are
// decoded through `Scalar`; malformed wrappers fail with the offending
// table, record index and field. Order totals are the one lenient field.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::entities::{
    EventRecord, MatchRecord, OrderRecord, TicketRecord, UserRecord, EVENTS_STEM, MATCHES_STEM,
    ORDERS_STEM, TICKETS_STEM, USERS_STEM,
};
use crate::errors::NormalizeError;
use crate::value_objects::{json_kind, GameId, PaymentStatus, RecordId, Scalar, UserId};

const ID_KEYS: [&str; 2] = ["_id", "id"];
const USER_KEYS: [&str; 2] = ["userId", "user"];

pub fn normalize_matches(raw: Option<&Value>) -> Result<Vec<MatchRecord>, NormalizeError> {
    raw_records(MATCHES_STEM, raw)?
        .iter()
        .map(|record| -> Result<MatchRecord, NormalizeError> {
            Ok(MatchRecord {
                id: record.identifier(&ID_KEYS)?.map(RecordId),
                user_id: record.identifier(&USER_KEYS)?.map(UserId),
                game_id: record.game_id("gameId")?,
                created_at: record.instant("createdAt")?,
            })
        })
        .collect()
}

pub fn normalize_tickets(raw: Option<&Value>) -> Result<Vec<TicketRecord>, NormalizeError> {
    raw_records(TICKETS_STEM, raw)?
        .iter()
        .map(|record| -> Result<TicketRecord, NormalizeError> {
            Ok(TicketRecord {
                id: record.identifier(&ID_KEYS)?.map(RecordId),
                user_id: record.identifier(&USER_KEYS)?.map(UserId),
                game_id: record.game_id("gameId")?,
                amount: record.integer("amount")?,
                created_at: record.instant("createdAt")?,
            })
        })
        .collect()
}

pub fn normalize_users(raw: Option<&Value>) -> Result<Vec<UserRecord>, NormalizeError> {
    raw_records(USERS_STEM, raw)?
        .iter()
        .map(|record| -> Result<UserRecord, NormalizeError> {
            Ok(UserRecord {
                id: record.identifier(&ID_KEYS)?.map(UserId),
                nickname: record.text("nickname")?,
                created_at: record.instant("createdAt")?,
            })
        })
        .collect()
}

pub fn normalize_events(raw: Option<&Value>) -> Result<Vec<EventRecord>, NormalizeError> {
    raw_records(EVENTS_STEM, raw)?
        .iter()
        .map(|record| -> Result<EventRecord, NormalizeError> {
            Ok(EventRecord {
                title: record.text("title")?,
                start_date: record.instant("startDate")?,
                end_date: record.instant("endDate")?,
            })
        })
        .collect()
}

pub fn normalize_orders(raw: Option<&Value>) -> Result<Vec<OrderRecord>, NormalizeError> {
    raw_records(ORDERS_STEM, raw)?
        .iter()
        .map(|record| -> Result<OrderRecord, NormalizeError> {
            Ok(OrderRecord {
                id: record.identifier(&ID_KEYS)?.map(RecordId),
                user_id: record.identifier(&USER_KEYS)?.map(UserId),
                total_amount: record.lenient_float("totalAmount"),
                payment_status: record
                    .text("paymentStatus")?
                    .map(|status| PaymentStatus::from(status.as_str())),
                created_at: record.instant("createdAt")?,
            })
        })
        .collect()
}

struct RawRecord<'a> {
    table: &'static str,
    index: usize,
    fields: &'a Map<String, Value>,
}

fn raw_records<'a>(
    table: &'static str,
    raw: Option<&'a Value>,
) -> Result<Vec<RawRecord<'a>>, NormalizeError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    let Value::Array(items) = raw else {
        return Err(NormalizeError::NotARecordList {
            table: table.to_string(),
            found: json_kind(raw),
        });
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(RawRecord {
                table,
                index,
                fields,
            }),
            other => Err(NormalizeError::NotAnObject {
                table: table.to_string(),
                index,
                found: json_kind(other),
            }),
        })
        .collect()
}

impl<'a> RawRecord<'a> {
    /// First non-null value among `keys`, decoded.
    fn scalar(
        &self,
        keys: &[&'static str],
    ) -> Result<Option<(&'static str, Scalar)>, NormalizeError> {
        for &key in keys {
            match self.fields.get(key) {
                None | Some(Value::Null) => continue,
                Some(value) => {
                    let scalar = Scalar::decode(value)
                        .map_err(|err| self.malformed(key, err.to_string()))?;
                    return Ok(Some((key, scalar)));
                }
            }
        }
        Ok(None)
    }

    fn instant(&self, field: &'static str) -> Result<Option<DateTime<Utc>>, NormalizeError> {
        let Some((key, scalar)) = self.scalar(&[field])? else {
            return Ok(None);
        };
        scalar.as_instant().map(Some).ok_or_else(|| {
            self.malformed(
                key,
                format!("expected epoch millis or a wrapped date, found {}", scalar.kind()),
            )
        })
    }

    fn integer(&self, field: &'static str) -> Result<Option<i64>, NormalizeError> {
        let Some((key, scalar)) = self.scalar(&[field])? else {
            return Ok(None);
        };
        scalar.as_integer().map(Some).ok_or_else(|| {
            self.malformed(key, format!("expected an integer, found {}", scalar.kind()))
        })
    }

    fn lenient_float(&self, field: &'static str) -> Option<f64> {
        match self.fields.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                Scalar::decode(value)
                    .map(|scalar| scalar.to_f64_or_zero())
                    .unwrap_or(0.0),
            ),
        }
    }

    fn identifier(&self, keys: &[&'static str]) -> Result<Option<String>, NormalizeError> {
        let Some((key, scalar)) = self.scalar(keys)? else {
            return Ok(None);
        };
        scalar.as_identifier().map(Some).ok_or_else(|| {
            self.malformed(key, format!("expected an identifier, found {}", scalar.kind()))
        })
    }

    fn game_id(&self, field: &'static str) -> Result<Option<GameId>, NormalizeError> {
        Ok(self.identifier(&[field])?.map(GameId))
    }

    fn text(&self, field: &'static str) -> Result<Option<String>, NormalizeError> {
        let Some((key, scalar)) = self.scalar(&[field])? else {
            return Ok(None);
        };
        match scalar {
            Scalar::Plain(Value::String(text)) => Ok(Some(text)),
            Scalar::Plain(Value::Number(number)) => Ok(Some(number.to_string())),
            Scalar::Plain(Value::Bool(flag)) => Ok(Some(flag.to_string())),
            other => Err(self.malformed(key, format!("expected text, found {}", other.kind()))),
        }
    }

    fn malformed(&self, field: &str, reason: String) -> NormalizeError {
        NormalizeError::MalformedField {
            table: self.table.to_string(),
            index: self.index,
            field: field.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn wrapped_and_plain_created_at_normalize_identically() {
        let raw = json!([
            {"_id": {"$oid": "a1"}, "userId": "u1", "gameId": "1",
             "createdAt": {"$date": {"$numberLong": "1704067200000"}}},
            {"_id": "a2", "userId": "u1", "gameId": "1", "createdAt": 1704067200000_i64}
        ]);
        let matches = normalize_matches(Some(&raw)).expect("normalize");
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(matches[0].created_at, Some(expected));
        assert_eq!(matches[1].created_at, Some(expected));
        assert_eq!(matches[0].id, Some(RecordId("a1".to_string())));
    }

    #[test]
    fn ticket_amount_wrapped_or_bare_is_integer() {
        let raw = json!([
            {"user": {"$oid": "u1"}, "gameId": "2", "amount": {"$numberInt": "5"}, "createdAt": 0},
            {"user": "u2", "gameId": "2", "amount": 5, "createdAt": 0}
        ]);
        let tickets = normalize_tickets(Some(&raw)).expect("normalize");
        assert_eq!(tickets[0].amount, Some(5));
        assert_eq!(tickets[1].amount, Some(5));
        assert_eq!(tickets[0].user_id, Some(UserId("u1".to_string())));
    }

    #[test]
    fn order_total_coercion_is_lenient() {
        let raw = json!([
            {"totalAmount": {"$numberDouble": "12.5"}, "paymentStatus": "paid", "createdAt": 0},
            {"totalAmount": 12.5, "paymentStatus": "paid", "createdAt": 0},
            {"totalAmount": "twelve", "paymentStatus": "paid", "createdAt": 0},
            {"totalAmount": {"$numberDouble": "n/a"}, "paymentStatus": "pending", "createdAt": 0}
        ]);
        let orders = normalize_orders(Some(&raw)).expect("normalize");
        assert_eq!(orders[0].total_amount, Some(12.5));
        assert_eq!(orders[1].total_amount, Some(12.5));
        assert_eq!(orders[2].total_amount, Some(0.0));
        assert_eq!(orders[3].total_amount, Some(0.0));
        assert_eq!(orders[0].payment_status, Some(PaymentStatus::Paid));
        assert_eq!(
            orders[3].payment_status,
            Some(PaymentStatus::Other("pending".to_string()))
        );
    }

    #[test]
    fn absent_fields_stay_absent() {
        let raw = json!([{"nickname": "ana"}]);
        let users = normalize_users(Some(&raw)).expect("normalize");
        assert_eq!(users[0].id, None);
        assert_eq!(users[0].created_at, None);
        assert_eq!(users[0].nickname.as_deref(), Some("ana"));
    }

    #[test]
    fn malformed_wrapper_names_the_field() {
        let raw = json!([
            {"createdAt": 0},
            {"createdAt": {"$date": {"$numberLong": "soon"}}}
        ]);
        let err = normalize_matches(Some(&raw)).expect_err("reject");
        match err {
            NormalizeError::MalformedField { table, index, field, .. } => {
                assert_eq!(table, "gamehistories");
                assert_eq!(index, 1);
                assert_eq!(field, "createdAt");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_list_dataset_is_rejected() {
        let raw = json!({"events": []});
        assert!(matches!(
            normalize_events(Some(&raw)),
            Err(NormalizeError::NotARecordList { .. })
        ));
    }

    #[test]
    fn missing_dataset_is_empty() {
        assert!(normalize_orders(None).expect("normalize").is_empty());
    }

    #[test]
    fn numeric_game_ids_become_strings() {
        let raw = json!([{"gameId": 3}, {"gameId": {"$numberInt": "4"}}]);
        let matches = normalize_matches(Some(&raw)).expect("normalize");
        assert_eq!(matches[0].game_id, Some(GameId::from("3")));
        assert_eq!(matches[1].game_id, Some(GameId::from("4")));
    }
}
