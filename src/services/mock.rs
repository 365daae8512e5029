// src/services/mock.rs

//! Built-in demonstration data served when the backend is unavailable.
//!
//! The fixture holds two categories (`billboard`, `bus_stop`), two
//! contractors, two employees and five structures covering every status.
//! Rental dates are laid out relative to the day the fixture is built so
//! the expiring-soon view always has something to show.

use chrono::{Duration, NaiveDate};
use serde_json::{Value, json};

use crate::models::{
    Billboard, BillboardQuery, BillboardStatus, Category, Contractor, Employee, Page,
    RawBillboard, Statistics,
};
use crate::services::normalize::Normalizer;

/// In-memory dataset mirroring the backend's resources.
#[derive(Debug, Clone)]
pub struct MockData {
    categories: Vec<Category>,
    contractors: Vec<Contractor>,
    employees: Vec<Employee>,
    billboards: Vec<RawBillboard>,
}

impl MockData {
    /// The standard fixture, dated around `today`.
    pub fn new(today: NaiveDate) -> Self {
        let categories = fixture_categories();
        let contractors = fixture_contractors();
        let employees = fixture_employees();
        let billboards = fixture_billboards(today, &categories, &contractors, &employees);
        Self::from_parts(categories, contractors, employees, billboards)
    }

    /// Custom dataset; category counts are recomputed from `billboards`.
    pub fn from_parts(
        mut categories: Vec<Category>,
        contractors: Vec<Contractor>,
        employees: Vec<Employee>,
        billboards: Vec<RawBillboard>,
    ) -> Self {
        for category in &mut categories {
            category.billboards_count = billboards
                .iter()
                .filter(|b| b.category.as_ref().and_then(Value::as_i64) == Some(category.id))
                .count() as u64;
        }
        Self {
            categories,
            contractors,
            employees,
            billboards,
        }
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    pub fn contractors(&self) -> Vec<Contractor> {
        self.contractors.clone()
    }

    pub fn employees(&self) -> Vec<Employee> {
        self.employees.clone()
    }

    /// All structures, normalized.
    pub fn all_billboards(&self, normalizer: &Normalizer) -> Vec<Billboard> {
        self.billboards
            .iter()
            .cloned()
            .map(|raw| normalizer.billboard(raw))
            .collect()
    }

    /// Structures matching `query`, as a single unpaginated page.
    ///
    /// Pages beyond the first are empty so callers appending pages never
    /// see duplicates.
    pub fn billboards(&self, normalizer: &Normalizer, query: &BillboardQuery) -> Page<Billboard> {
        let matching: Vec<Billboard> = self
            .all_billboards(normalizer)
            .into_iter()
            .filter(|b| query.matches(b))
            .collect();
        if query.page_number() > 1 {
            return Page {
                items: Vec::new(),
                next_page: None,
                total_count: matching.len(),
            };
        }
        Page::single(matching)
    }

    pub fn billboard(&self, normalizer: &Normalizer, id: i64) -> Option<Billboard> {
        self.billboards
            .iter()
            .find(|raw| raw.id == id)
            .cloned()
            .map(|raw| normalizer.billboard(raw))
    }

    pub fn statistics(&self, normalizer: &Normalizer) -> Statistics {
        Statistics::from_billboards(&self.all_billboards(normalizer))
    }

    pub fn expiring_soon(
        &self,
        normalizer: &Normalizer,
        today: NaiveDate,
        within_days: i64,
    ) -> Vec<Billboard> {
        expiring_within(self.all_billboards(normalizer), today, within_days)
    }
}

/// Active structures whose rental ends between `today` and `today + within_days`.
pub fn expiring_within(
    billboards: Vec<Billboard>,
    today: NaiveDate,
    within_days: i64,
) -> Vec<Billboard> {
    let Some(horizon) = Duration::try_days(within_days).and_then(|d| today.checked_add_signed(d))
    else {
        log::warn!("Expiring window of {within_days} days is out of range");
        return Vec::new();
    };
    billboards
        .into_iter()
        .filter(|b| b.status == BillboardStatus::Active)
        .filter(|b| b.end_date().is_some_and(|end| end >= today && end <= horizon))
        .collect()
}

fn fixture_categories() -> Vec<Category> {
    vec![
        Category {
            id: 1,
            name: "Billboard".to_string(),
            slug: "billboard".to_string(),
            description: "Large-format roadside structures".to_string(),
            icon: "monitor".to_string(),
            color: "#3b82f6".to_string(),
            is_active: true,
            order: 1,
            billboards_count: 0,
        },
        Category {
            id: 2,
            name: "Bus stop".to_string(),
            slug: "bus_stop".to_string(),
            description: "Advertising panels on public transport stops".to_string(),
            icon: "bus".to_string(),
            color: "#10b981".to_string(),
            is_active: true,
            order: 2,
            billboards_count: 0,
        },
    ]
}

fn fixture_contractors() -> Vec<Contractor> {
    vec![
        Contractor {
            id: 1,
            name: "Reklama Pro LLC".to_string(),
            contact_person: "Bekzod Tursunov".to_string(),
            phone: "+998 90 123 45 67".to_string(),
            email: "office@reklamapro.uz".to_string(),
            address: "Tashkent, Shota Rustaveli 12".to_string(),
            contract_number: "RP-2024/017".to_string(),
            inn: "305123456".to_string(),
            is_active: true,
            billboards_count: 2,
            display_contact: "Bekzod Tursunov (+998 90 123 45 67)".to_string(),
            ..Contractor::default()
        },
        Contractor {
            id: 2,
            name: "City Media Group".to_string(),
            contact_person: "Malika Yusupova".to_string(),
            phone: "+998 71 200 10 20".to_string(),
            email: "info@citymedia.uz".to_string(),
            address: "Tashkent, Bunyodkor 5".to_string(),
            contract_number: "CMG-2025/003".to_string(),
            inn: "307654321".to_string(),
            website: "https://citymedia.uz".to_string(),
            is_active: true,
            billboards_count: 1,
            display_contact: "Malika Yusupova (+998 71 200 10 20)".to_string(),
            ..Contractor::default()
        },
    ]
}

fn fixture_employees() -> Vec<Employee> {
    vec![
        Employee {
            id: 1,
            full_name: "Aziz Karimov".to_string(),
            email: "a.karimov@example.uz".to_string(),
            ..Employee::default()
        },
        Employee {
            id: 2,
            full_name: "Dilnoza Rashidova".to_string(),
            email: "d.rashidova@example.uz".to_string(),
            ..Employee::default()
        },
    ]
}

/// Seed row for one structure.
struct Seed {
    id: i64,
    title: &'static str,
    category: usize,
    contractor: Option<usize>,
    employee: usize,
    size: (&'static str, &'static str),
    address: &'static str,
    coords: (&'static str, &'static str),
    /// Start and end offsets in days from today
    rental: (i64, i64),
    status: &'static str,
    price: Option<&'static str>,
    images: Value,
}

fn fixture_billboards(
    today: NaiveDate,
    categories: &[Category],
    contractors: &[Contractor],
    employees: &[Employee],
) -> Vec<RawBillboard> {
    let seeds = [
        Seed {
            id: 1,
            title: "Amir Temur Avenue LED",
            category: 0,
            contractor: Some(0),
            employee: 0,
            size: ("6.00", "3.00"),
            address: "Tashkent, Amir Temur Avenue 107",
            coords: ("41.3381000", "69.2843000"),
            rental: (-60, 20),
            status: "active",
            price: Some("12000000.00"),
            images: json!(["/billboards/amir-temur-1.jpg", "/billboards/amir-temur-2.jpg"]),
        },
        Seed {
            id: 2,
            title: "Chilonzor Ring Road",
            category: 0,
            contractor: Some(1),
            employee: 1,
            size: ("12.00", "4.00"),
            address: "Tashkent, Chilonzor district, Ring Road km 4",
            coords: ("41.2756000", "69.2034000"),
            rental: (10, 375),
            status: "pending",
            price: None,
            images: json!([]),
        },
        Seed {
            id: 3,
            title: "Mustaqillik Square Stop",
            category: 1,
            contractor: Some(0),
            employee: 0,
            size: ("3.50", "1.80"),
            address: "Tashkent, Mustaqillik Square",
            coords: ("41.3111000", "69.2797000"),
            rental: (-200, 165),
            status: "active",
            price: Some("2500000.00"),
            images: json!([{"id": 31, "image": "/bus-stops/mustaqillik.jpg", "is_primary": true}]),
        },
        Seed {
            id: 4,
            title: "Yunusabad Metro Stop",
            category: 1,
            contractor: None,
            employee: 1,
            size: ("3.00", "1.50"),
            address: "Tashkent, Yunusabad, Bogishamol street",
            coords: ("41.3650000", "69.2870000"),
            rental: (-30, 90),
            status: "maintenance",
            price: Some("1800000.00"),
            images: json!(["/bus-stops/yunusabad.jpg"]),
        },
        Seed {
            id: 5,
            title: "Olmazor Stop",
            category: 1,
            contractor: None,
            employee: 0,
            size: ("3.00", "1.50"),
            address: "Tashkent, Olmazor, Talabalar street",
            coords: ("41.3560000", "69.2130000"),
            rental: (-380, -15),
            status: "expired",
            price: None,
            images: Value::Null,
        },
    ];

    seeds
        .into_iter()
        .map(|seed| {
            let category = &categories[seed.category];
            let employee = &employees[seed.employee];
            let contractor = seed.contractor.and_then(|i| contractors.get(i));
            let start = today + Duration::days(seed.rental.0);
            let end = today + Duration::days(seed.rental.1);

            RawBillboard {
                id: seed.id,
                title: Some(seed.title.to_string()),
                category: Some(json!(category.id)),
                category_data: Some(category_value(category)),
                contractor: contractor.map(|c| json!(c.id)),
                contractor_data: contractor.map(|c| {
                    json!({"id": c.id, "name": c.name, "phone": c.phone, "is_active": c.is_active})
                }),
                employee: Some(json!(employee.id)),
                employee_name: Some(employee.full_name.clone()),
                width: Some(json!(seed.size.0)),
                height: Some(json!(seed.size.1)),
                address: Some(seed.address.to_string()),
                latitude: Some(json!(seed.coords.0)),
                longitude: Some(json!(seed.coords.1)),
                start_date: Some(start.format("%Y-%m-%d").to_string()),
                end_date: Some(end.format("%Y-%m-%d").to_string()),
                status: Some(seed.status.to_string()),
                price: seed.price.map(|p| json!(p)),
                images: Some(seed.images.clone()),
                ..RawBillboard::default()
            }
        })
        .collect()
}

fn category_value(category: &Category) -> Value {
    json!({
        "id": category.id,
        "name": category.name,
        "slug": category.slug,
        "description": category.description,
        "icon": category.icon,
        "color": category.color,
        "is_active": category.is_active,
        "order": category.order,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DisplayConfig;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn fixture() -> (MockData, Normalizer) {
        (
            MockData::new(today()),
            Normalizer::new(DisplayConfig::default(), today()),
        )
    }

    #[test]
    fn test_fixture_shape() {
        let (mock, n) = fixture();
        assert_eq!(mock.categories().len(), 2);
        assert!(mock.contractors().len() >= 2);
        let all = mock.all_billboards(&n);
        assert!(all.len() >= 4);

        let statuses: std::collections::HashSet<_> = all.iter().map(|b| b.status).collect();
        assert!(statuses.len() >= 3);
        for category in mock.categories() {
            assert!(all.iter().any(|b| b.category_data.slug == category.slug));
        }
    }

    #[test]
    fn test_category_counts_recomputed() {
        let (mock, _) = fixture();
        let counts: Vec<_> = mock
            .categories()
            .iter()
            .map(|c| (c.slug.clone(), c.billboards_count))
            .collect();
        assert_eq!(
            counts,
            vec![("billboard".to_string(), 2), ("bus_stop".to_string(), 3)]
        );
    }

    #[test]
    fn test_billboard_category_page() {
        let (mock, n) = fixture();
        let page = mock.billboards(&n, &BillboardQuery::category("billboard").with_page(1));
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, 2);
        assert_eq!(page.next_page, None);
        assert!(page.items.iter().all(|b| b.category_data.slug == "billboard"));
    }

    #[test]
    fn test_later_pages_are_empty() {
        let (mock, n) = fixture();
        let page = mock.billboards(&n, &BillboardQuery::category("bus_stop").with_page(2));
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 3);
        assert_eq!(page.next_page, None);
    }

    #[test]
    fn test_filters_apply_to_mock() {
        let (mock, n) = fixture();
        let query = BillboardQuery {
            category: Some("2".into()),
            status: Some(BillboardStatus::Active),
            ..BillboardQuery::default()
        };
        let page = mock.billboards(&n, &query);
        assert_eq!(page.items.iter().map(|b| b.id).collect::<Vec<_>>(), vec![3]);

        let by_employee = mock.billboards(
            &n,
            &BillboardQuery {
                employee: Some(2),
                ..BillboardQuery::default()
            },
        );
        assert_eq!(
            by_employee.items.iter().map(|b| b.id).collect::<Vec<_>>(),
            vec![2, 4]
        );

        let search = mock.billboards(
            &n,
            &BillboardQuery {
                search: Some("MUSTAQILLIK".into()),
                ..BillboardQuery::default()
            },
        );
        assert_eq!(search.items.len(), 1);
    }

    #[test]
    fn test_statistics_counts() {
        let (mock, n) = fixture();
        let stats = mock.statistics(&n);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.maintenance, 1);
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.categories.get("bus_stop"), Some(&3));
        let contractors = stats.contractors.unwrap();
        assert_eq!(contractors.get("Reklama Pro LLC"), Some(&2));
    }

    #[test]
    fn test_expiring_soon_window() {
        let (mock, n) = fixture();
        let expiring = mock.expiring_soon(&n, today(), 30);
        assert_eq!(expiring.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1]);
        assert!(mock.expiring_soon(&n, today(), 10).is_empty());
    }

    #[test]
    fn test_expiring_soon_out_of_range_window_is_empty() {
        let (mock, n) = fixture();
        assert!(mock.expiring_soon(&n, today(), i64::MAX).is_empty());
        assert!(mock.expiring_soon(&n, NaiveDate::MAX, 30).is_empty());
    }

    #[test]
    fn test_mock_records_are_repaired() {
        let (mock, n) = fixture();
        let pending = mock.billboard(&n, 2).unwrap();
        assert_eq!(pending.images, vec![DisplayConfig::default().placeholder_image]);
        assert_eq!(pending.size, "12.00x4.00 m");
        assert_eq!(pending.employee, "Dilnoza Rashidova");
        assert!(mock.billboard(&n, 999).is_none());
    }
}
