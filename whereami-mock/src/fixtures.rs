use whereami_core::Coordinates;

/// Well-known places the static mock resolves. Matching ignores ASCII case
/// and surrounding whitespace.
pub fn by_query(query: &str) -> Option<Coordinates> {
    let q = query.trim();
    PLACES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(q))
        .map(|&(_, c)| c)
}

const PLACES: &[(&str, Coordinates)] = &[
    ("Empire State Building", Coordinates::new(40.7484, -73.9857)),
    ("Berlin", Coordinates::new(52.5200, 13.4050)),
    ("123 Elm Street, Seattle", Coordinates::new(47.6062, -122.3321)),
    ("Eiffel Tower", Coordinates::new(48.8584, 2.2945)),
    ("Sydney Opera House", Coordinates::new(-33.8568, 151.2153)),
];
