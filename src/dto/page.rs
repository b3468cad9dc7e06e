use serde::{Deserialize, Serialize};

/// Envoltorio de paginación: un slice de resultados más metadatos.
///
/// `total_count` cuenta todas las filas que cumplen los filtros, sin aplicar
/// `limit`/`offset`, así que siempre es `>= items.len()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub offset: i64,
    pub limit: i64,
}

impl<T> Page<T> {
    pub fn of(items: Vec<T>, total_count: i64, offset: i64, limit: i64) -> Self {
        Self {
            items,
            total_count,
            offset,
            limit,
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            offset: self.offset,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::of(vec![1, 2, 3], 40, 10, 3).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20, 30]);
        assert_eq!(page.total_count, 40);
        assert_eq!(page.offset, 10);
        assert_eq!(page.limit, 3);
    }

    #[test]
    fn test_serialized_envelope() {
        let page: Page<i32> = Page::of(vec![], 0, 0, 10);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["items"], serde_json::json!([]));
        assert_eq!(json["total_count"], 0);
        assert_eq!(json["limit"], 10);
    }
}
