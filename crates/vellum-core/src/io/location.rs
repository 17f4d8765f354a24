// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Helpers for the string addresses manifests are loaded from.

/// Strips the final path segment of `location`, keeping the trailing `/`.
///
/// `"assets/sheet.json"` becomes `"assets/"`; a location without any `/` has an
/// empty base.
pub fn base_location(location: &str) -> &str {
    match location.rfind('/') {
        Some(index) => &location[..=index],
        None => "",
    }
}

/// Resolves a resource named in a manifest against the manifest's base location.
///
/// This is plain concatenation: `name` is always treated as relative.
pub fn resolve_sibling(base: &str, name: &str) -> String {
    let mut resolved = String::with_capacity(base.len() + name.len());
    resolved.push_str(base);
    resolved.push_str(name);
    resolved
}

/// Returns `true` when `origin` is served over an HTTP-family protocol.
///
/// The scheme is the text before the first `:`; it counts as HTTP when it contains
/// `http` in any case (`http`, `https`). An address without a scheme is local.
pub fn is_http_origin(origin: &str) -> bool {
    scheme(origin)
        .map(|scheme| scheme.to_ascii_lowercase().contains("http"))
        .unwrap_or(false)
}

fn scheme(address: &str) -> Option<&str> {
    let (scheme, _) = address.split_once(':')?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_location_strips_last_segment() {
        assert_eq!(base_location("assets/sheet.json"), "assets/");
        assert_eq!(
            base_location("http://cdn.example/a/b/rig.json"),
            "http://cdn.example/a/b/"
        );
        assert_eq!(base_location("assets/"), "assets/");
        assert_eq!(base_location("sheet.json"), "");
    }

    #[test]
    fn sibling_is_plain_concatenation() {
        assert_eq!(resolve_sibling("assets/", "sheet.png"), "assets/sheet.png");
        assert_eq!(resolve_sibling("", "sheet.png"), "sheet.png");
    }

    #[test]
    fn http_origins() {
        assert!(is_http_origin("http://cdn.example/sheet.json"));
        assert!(is_http_origin("HTTPS://cdn.example/sheet.json"));
        assert!(!is_http_origin("file:///tmp/sheet.json"));
        assert!(!is_http_origin("assets/sheet.json"));
        assert!(!is_http_origin("C:/assets/sheet.json"));
        assert!(!is_http_origin("assets/http:thing.json"));
    }
}
