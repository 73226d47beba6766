use crate::ap::utils::{ItemId, ItemSet, TransactionId};

pub const FIELD_DELIMITER: char = '\t';
pub const ITEM_DELIMITER: &str = " ";

/// One record of the transaction database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    /// Item count as written in the record; never checked against `items`.
    pub declared_len: i64,
    pub items: ItemSet,
}

impl Transaction {
    pub fn new(id: TransactionId, items: impl IntoIterator<Item = ItemId>) -> Self {
        let items: ItemSet = items.into_iter().collect();
        Self {
            id,
            declared_len: items.len() as i64,
            items,
        }
    }

    /// Renders the record line (without newline) in database format.
    pub fn to_line(&self) -> String {
        let items = self
            .items
            .items()
            .iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join(ITEM_DELIMITER);
        format!(
            "{}{FIELD_DELIMITER}{}{FIELD_DELIMITER}{items}",
            self.id, self.declared_len
        )
    }
}

pub(crate) fn parse_count_line(line: &str) -> Result<u64, String> {
    let trimmed = line.trim();
    let count: i64 = trimmed
        .parse()
        .map_err(|_| format!("transaction count '{trimmed}' is not an integer"))?;
    if count <= 0 {
        return Err(format!("transaction count must be positive, got {count}"));
    }
    Ok(count as u64)
}

pub(crate) fn parse_record(line: &str) -> Result<Transaction, String> {
    let fields: Vec<&str> = line
        .trim_end_matches(['\n', '\r'])
        .split(FIELD_DELIMITER)
        .collect();
    let [id, declared_len, items] = fields.as_slice() else {
        return Err(format!("expected 3 tab-separated fields, found {}", fields.len()));
    };

    let id = parse_int(id, "transaction id")?;
    let declared_len = parse_int(declared_len, "item count")?;
    let items = items.trim_end();
    if items.is_empty() {
        return Err(format!("transaction {id} has an empty item set"));
    }
    // exactly one space between items; an empty token is malformed
    let items = items
        .split(ITEM_DELIMITER)
        .map(|item| parse_int(item, "item"))
        .collect::<Result<Vec<ItemId>, _>>()?;

    Ok(Transaction {
        id,
        declared_len,
        items: ItemSet::new(items),
    })
}

fn parse_int(field: &str, what: &str) -> Result<i64, String> {
    let field = field.trim();
    field
        .parse()
        .map_err(|_| format!("{what} '{field}' is not an integer"))
}
