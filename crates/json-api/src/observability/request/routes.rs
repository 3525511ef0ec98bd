//! Route templates for log and metric labels.

use uuid::Uuid;

/// Replace uuid path segments so every order or food maps to one label.
pub(super) fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_segments_are_templated() {
        let path = format!("/api/v1/order/{}/cancel", Uuid::now_v7());

        assert_eq!(route_template(&path), "/api/v1/order/{id}/cancel");
    }

    #[test]
    fn static_paths_are_unchanged() {
        assert_eq!(route_template("/"), "/");
        assert_eq!(route_template("/api/v1/cart"), "/api/v1/cart");
    }
}
