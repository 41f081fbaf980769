//! Link model extraction from a realistic license document.

use lcp_license::{Links, HINT, PUBLICATION, SELF};
use serde_json::Value;

const LICENSE: &str = r#"{
  "id": "ef15e740-73de-4d6c-b728-2715885fe0dc",
  "issued": "2025-11-12T16:02:00Z",
  "provider": "https://www.imaginaryebooks.example",
  "encryption": {
    "profile": "http://readium.org/lcp/profile-1.0",
    "content_key": {
      "algorithm": "http://www.w3.org/2009/xmlenc11#aes256-gcm",
      "encrypted_value": "/k8RpXqf4E2WEunCp76E8PjhS051NXwqT+bfYQJSljc="
    }
  },
  "links": {
    "hint": {
      "href": "https://www.imaginaryebooks.example/lcp/hint",
      "type": "text/html",
      "title": "Forgot your passphrase?"
    },
    "publication": {
      "href": "https://www.imaginaryebooks.example/shelf/moby-dick.epub",
      "type": "application/epub+zip",
      "length": "15437294",
      "hash": "4c0dbbe0fbbd"
    },
    "self": {
      "href": "https://www.imaginaryebooks.example/lcp/licenses/ef15e740",
      "type": "application/vnd.readium.lcp.license.v1.0+json"
    },
    "status": {
      "href": "https://www.imaginaryebooks.example/lcp/status/ef15e740",
      "type": "application/vnd.readium.license.status.v1.0+json"
    },
    "alternate": [
      {
        "href": "https://mirror-a.example/shelf/moby-dick.epub",
        "type": "application/epub+zip"
      },
      {
        "href": "https://mirror-b.example/shelf/moby-dick.epub",
        "type": "application/epub+zip"
      }
    ]
  },
  "rights": { "print": 20, "copy": 1024 }
}"#;

#[test]
fn test_realistic_license_parses() {
    let root: Value = serde_json::from_str(LICENSE).unwrap();
    let links = Links::parse(&root).unwrap();

    for name in [HINT, PUBLICATION, SELF, "status"] {
        assert!(links.has(name), "missing single link {name:?}");
    }

    let publication = links.publication().unwrap();
    assert_eq!(
        publication.href,
        "https://www.imaginaryebooks.example/shelf/moby-dick.epub"
    );
    assert_eq!(publication.media_type.as_deref(), Some("application/epub+zip"));
    assert_eq!(publication.length.as_deref(), Some("15437294"));
    assert_eq!(publication.hash.as_deref(), Some("4c0dbbe0fbbd"));

    let hint = links.hint().unwrap();
    assert_eq!(hint.title.as_deref(), Some("Forgot your passphrase?"));

    let mirrors = links.links("alternate").unwrap();
    assert_eq!(mirrors.len(), 2);
    assert!(mirrors[0].href.starts_with("https://mirror-a"));
    assert!(mirrors[1].href.starts_with("https://mirror-b"));
}

#[test]
fn test_truncated_license_rejected() {
    // Same document with the links section cut out entirely.
    let mut root: Value = serde_json::from_str(LICENSE).unwrap();
    root.as_object_mut().unwrap().remove("links");
    assert!(Links::parse(&root).is_err());
}
