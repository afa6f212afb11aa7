// Property-based tests for page-spec validation and page math.

use proptest::prelude::*;

use catalogd::core::pagination::{Page, PageQuery, PageRequest, SortDirection, MAX_PAGE_SIZE};

const COLUMNS: &[(&str, &'static str)] = &[("id", "id"), ("name", "name")];

proptest! {
    /// Property: total_pages is always ceil(total_elements / size)
    #[test]
    fn test_total_pages_is_ceiling_division(
        total in 0i64..100_000,
        size in 1u32..=MAX_PAGE_SIZE,
    ) {
        let query = PageQuery {
            page: 0,
            size,
            sort: None,
            direction: SortDirection::Asc,
        };
        let request = PageRequest::from_query(&query, COLUMNS).unwrap();
        let page: Page<i64> = Page::new(vec![], &request, total);

        let size = i64::from(request.size);
        prop_assert_eq!(page.total_pages, (total + size - 1) / size);
        prop_assert!(page.total_pages * size >= total);
        prop_assert!((page.total_pages - 1) * size < total || total == 0);
    }

    /// Property: offset never overflows and always equals page * size
    #[test]
    fn test_offset_is_page_times_size(
        page in 0u32..10_000,
        size in 1u32..=MAX_PAGE_SIZE,
    ) {
        let query = PageQuery {
            page,
            size,
            sort: None,
            direction: SortDirection::Asc,
        };
        let request = PageRequest::from_query(&query, COLUMNS).unwrap();

        prop_assert_eq!(request.offset(), i64::from(page) * i64::from(request.size));
        prop_assert!(request.limit() >= 1);
        prop_assert!(request.limit() <= i64::from(MAX_PAGE_SIZE));
    }
}

#[test]
fn test_map_keeps_metadata() {
    let query = PageQuery {
        page: 2,
        size: 10,
        sort: None,
        direction: SortDirection::Asc,
    };
    let request = PageRequest::from_query(&query, COLUMNS).unwrap();
    let page = Page::new(vec![1, 2, 3], &request, 23);

    let mapped = page.map(|n| n.to_string());
    assert_eq!(mapped.content, vec!["1", "2", "3"]);
    assert_eq!(mapped.page, 2);
    assert_eq!(mapped.total_elements, 23);
    assert_eq!(mapped.total_pages, 3);
}

#[test]
fn test_direction_sql_rendering() {
    assert_eq!(SortDirection::Asc.as_sql(), "ASC");
    assert_eq!(SortDirection::Desc.as_sql(), "DESC");
}

#[test]
fn test_query_deserializes_from_url_form() {
    // Mirrors ?page=0&size=12&sort=name&direction=asc
    let query: PageQuery =
        serde_json::from_str(r#"{"page":0,"size":12,"sort":"name","direction":"asc"}"#).unwrap();
    let request = PageRequest::from_query(&query, COLUMNS).unwrap();

    assert_eq!(request.page, 0);
    assert_eq!(request.size, 12);
    assert_eq!(request.sort_column, "name");
    assert_eq!(request.direction, SortDirection::Asc);
}
