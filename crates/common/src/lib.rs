pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn page_reports_counts() {
        let p = types::Page { items: vec![1, 2], page: 1, per_page: 2, total: 5 };
        assert_eq!(p.total_pages(), 3);
        let body = serde_json::to_value(&p).unwrap();
        assert_eq!(body["total"], 5);
        assert_eq!(body["items"][1], 2);
    }
}
