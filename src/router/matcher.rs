// ============================================================================
// MATCHER - Path -> ruta, con captura de segmentos `:param`
// ============================================================================

use std::collections::BTreeMap;
use crate::models::RouteDescriptor;

pub type Params = BTreeMap<String, String>;

/// Quita query, fragmento y barra final (excepto la raíz)
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = path[..end].trim_end_matches('/');
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

/// Compara un patrón (`/objects/:id`) con un path ya normalizado
pub fn match_pattern(pattern: &str, path: &str) -> Option<Params> {
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    let mut params = Params::new();

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(params),
            (Some(expected), Some(actual)) => {
                if let Some(name) = expected.strip_prefix(':') {
                    if actual.is_empty() {
                        return None;
                    }
                    params.insert(name.to_string(), actual.to_string());
                } else if expected != actual {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

/// Primera ruta que coincide, en orden de declaración
pub fn find_route<'a>(routes: &'a [RouteDescriptor], path: &str) -> Option<(&'a RouteDescriptor, Params)> {
    let path = normalize_path(path);
    routes
        .iter()
        .find_map(|route| match_pattern(route.path, path).map(|params| (route, params)))
}
