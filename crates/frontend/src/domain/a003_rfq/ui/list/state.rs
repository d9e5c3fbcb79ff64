use super::RfqListRow;
use leptos::prelude::*;

/// Page size is fixed; pagination is purely client-side over the loaded
/// array.
pub const PAGE_SIZE: usize = 10;

#[derive(Clone, Debug)]
pub struct RfqListState {
    pub items: Vec<RfqListRow>,
    pub search_query: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub page: usize,
    pub is_loaded: bool,
}

impl Default for RfqListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            sort_field: "rfq_id".to_string(),
            sort_ascending: false,
            page: 0,
            is_loaded: false,
        }
    }
}

impl RfqListState {
    /// Filter + sort + paginate in memory.
    pub fn visible(&self) -> Vec<RfqListRow> {
        let query = self.search_query.trim().to_lowercase();
        let mut rows: Vec<RfqListRow> = self
            .items
            .iter()
            .filter(|row| {
                query.is_empty()
                    || row.rfq_name.to_lowercase().contains(&query)
                    || row.client_name.to_lowercase().contains(&query)
            })
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let ordering = match self.sort_field.as_str() {
                "rfq_name" => a.rfq_name.cmp(&b.rfq_name),
                "client_name" => a.client_name.cmp(&b.client_name),
                "status" => a.status.cmp(&b.status),
                _ => a.rfq_id.cmp(&b.rfq_id),
            };
            if self.sort_ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });

        rows.into_iter()
            .skip(self.page * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }

    pub fn filtered_count(&self) -> usize {
        let query = self.search_query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|row| {
                query.is_empty()
                    || row.rfq_name.to_lowercase().contains(&query)
                    || row.client_name.to_lowercase().contains(&query)
            })
            .count()
    }

    pub fn total_pages(&self) -> usize {
        self.filtered_count().div_ceil(PAGE_SIZE).max(1)
    }

    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_field = field.to_string();
            self.sort_ascending = true;
        }
        self.page = 0;
    }
}

pub fn create_state() -> RwSignal<RfqListState> {
    RwSignal::new(RfqListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, name: &str, client: &str) -> RfqListRow {
        RfqListRow {
            rfq_id: id,
            rfq_name: name.to_string(),
            client_id: 1,
            client_name: client.to_string(),
            status: "draft".to_string(),
        }
    }

    #[test]
    fn search_matches_rfq_and_client_names() {
        let state = RfqListState {
            items: vec![
                row(1, "Q1-Fittings", "Acme"),
                row(2, "Q2-Valves", "Borealis"),
            ],
            search_query: "bore".to_string(),
            ..Default::default()
        };
        let visible = state.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].rfq_id, 2);
    }

    #[test]
    fn toggle_sort_flips_direction_on_same_field() {
        let mut state = RfqListState::default();
        state.toggle_sort("rfq_name");
        assert!(state.sort_ascending);
        state.toggle_sort("rfq_name");
        assert!(!state.sort_ascending);
    }

    #[test]
    fn pagination_is_fixed_size() {
        let items = (0..25).map(|i| row(i, "Q", "C")).collect();
        let state = RfqListState {
            items,
            sort_ascending: true,
            sort_field: "rfq_id".to_string(),
            page: 2,
            ..Default::default()
        };
        assert_eq!(state.total_pages(), 3);
        assert_eq!(state.visible().len(), 5);
    }
}
