use serde::{Deserialize, Serialize};

/// Pagination metadata reported by the API. `total_pages` is trusted as given.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

/// One page of rows together with its metadata.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PageEnvelope<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> PageEnvelope<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::movie::Movie;

    #[test]
    fn ignores_extra_meta_fields() {
        let envelope: PageEnvelope<Movie> = serde_json::from_str(
            r#"{"data": [{"id": 1, "name": "Lật Mặt 7"}],
                "meta": {"total": 1, "page": 1, "totalPages": 1, "take": 10}}"#,
        )
        .unwrap();
        assert_eq!(envelope.data[0].name, "Lật Mặt 7");
        assert_eq!(
            envelope.meta,
            PageMeta {
                total: 1,
                page: 1,
                total_pages: 1
            }
        );
    }
}
