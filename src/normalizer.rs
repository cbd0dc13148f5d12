use crate::model::{CategoryGroup, Personality, RawDocument, RawPerson};
use tracing::{debug, warn};

/// Display category of the distinguished record.
pub const PERSON_OF_THE_YEAR: &str = "Person of the Year";

type RoleField = fn(&RawPerson) -> Option<&str>;

/// Role-like fields in order of preference.
const ROLE_FIELDS: &[RoleField] = &[role_title, role_company, role_work, role_focus];

fn role_title(p: &RawPerson) -> Option<&str> {
    p.title.as_deref()
}

fn role_company(p: &RawPerson) -> Option<&str> {
    p.company.as_deref()
}

fn role_work(p: &RawPerson) -> Option<&str> {
    p.work.as_deref()
}

fn role_focus(p: &RawPerson) -> Option<&str> {
    p.focus.as_deref()
}

/// Field-level fallbacks applied while normalizing.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub default_role: String,
    pub placeholder_image: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            default_role: "Leader".to_string(),
            placeholder_image: "/images/placeholder.jpg".to_string(),
        }
    }
}

/// Converts the raw document into display records.
///
/// Emission order is the person of the year, then every category in
/// document order with its people in document order. `id` and `rank` both
/// follow that order starting at 1.
pub fn normalize_document(doc: &RawDocument, opts: &NormalizeOptions) -> Vec<Personality> {
    let poy = doc.person_of_the_year.iter().map(|poy| Draft {
        name: &poy.name,
        sector: &poy.category,
        role: poy.category.clone(),
        image: poy.image.as_deref(),
        bio: &poy.description,
        category: PERSON_OF_THE_YEAR,
    });

    let people = doc.categories.iter().flat_map(|group| {
        group.people.iter().map(move |person| Draft {
            name: &person.name,
            sector: &group.category,
            role: derive_role(person, &opts.default_role),
            image: person.image.as_deref(),
            bio: &person.achievement,
            category: &group.category,
        })
    });

    let (_, records) = poy.chain(people).fold(
        (1u32, Vec::new()),
        |(next_id, mut records), draft| {
            records.push(draft.into_record(next_id, &opts.placeholder_image));
            (next_id + 1, records)
        },
    );

    debug!("Normalized {} records", records.len());
    records
}

struct Draft<'a> {
    name: &'a str,
    sector: &'a str,
    role: String,
    image: Option<&'a str>,
    bio: &'a str,
    category: &'a str,
}

impl Draft<'_> {
    fn into_record(self, id: u32, placeholder: &str) -> Personality {
        Personality {
            id,
            rank: id,
            name: self.name.to_string(),
            sector: self.sector.to_string(),
            role: self.role,
            image: resolve_image(self.image, placeholder),
            bio: self.bio.to_string(),
            achievements: extract_achievements(self.bio),
            impact: derive_impact(self.bio, self.sector),
            category: self.category.to_string(),
        }
    }
}

/// First non-empty role-like field, else `default_role`.
pub fn derive_role(person: &RawPerson, default_role: &str) -> String {
    ROLE_FIELDS
        .iter()
        .find_map(|get| get(person).filter(|v| !v.is_empty()))
        .unwrap_or(default_role)
        .to_string()
}

/// Up to three trimmed fragments split on `.` and `;`. Never empty: text
/// without any usable fragment is returned whole.
pub fn extract_achievements(text: &str) -> Vec<String> {
    let fragments: Vec<String> = text
        .split(['.', ';'])
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .take(3)
        .map(str::to_string)
        .collect();

    if fragments.is_empty() {
        vec![text.to_string()]
    } else {
        fragments
    }
}

/// Text before the first period, or a generic sentence about `category`.
pub fn derive_impact(text: &str, category: &str) -> String {
    match text.split('.').next() {
        Some(first) if !first.is_empty() => first.to_string(),
        _ => format!("Making a significant impact in {}", category),
    }
}

pub fn resolve_image(image: Option<&str>, placeholder: &str) -> String {
    match image {
        Some(path) if !path.is_empty() => path.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Buckets records by `category` following `order`. Empty buckets are
/// dropped, and so are records whose category is not listed in `order`.
pub fn group_by_category<'a, S: AsRef<str>>(
    records: &'a [Personality],
    order: &[S],
) -> Vec<CategoryGroup<'a>> {
    for record in records {
        if !order.iter().any(|c| c.as_ref() == record.category) {
            warn!(
                "Category '{}' of {} is not in the display order, skipping",
                record.category, record.name
            );
        }
    }

    order
        .iter()
        .map(|category| CategoryGroup {
            category: category.as_ref().to_string(),
            items: records
                .iter()
                .filter(|r| r.category == category.as_ref())
                .collect(),
        })
        .filter(|group| !group.items.is_empty())
        .collect()
}
