//! Package URL and CPE string construction.
//!
//! Identifiers are built by plain string formatting. Names and versions are
//! passed through verbatim into the purl and the dependency CPE; only
//! [`build_cpe`] (used for vulnerability-scan rows) sanitizes its inputs.
//! Keeping the raw pass-through makes identifiers reproducible across runs
//! against the same manifests.

use crate::model::Ecosystem;

/// Builds a Package URL like `pkg:npm/left-pad@1.0.0`.
///
/// Name and version are used verbatim, including a literal `unknown`
/// version when the manifest omitted one.
pub fn make_purl(ecosystem: Ecosystem, name: &str, version: &str) -> String {
    format!("pkg:{}/{}@{}", ecosystem.purl_type(), name, version)
}

/// Builds a best-effort CPE 2.3 string for a dependency.
///
/// Vendor and product are both set to the library name. Real CPE vendors
/// would need a dictionary lookup; this tool does not do one.
pub fn dependency_cpe(name: &str, version: &str) -> String {
    format!("cpe:2.3:a:{name}:{name}:{version}:*:*:*:*:*:*:*")
}

/// Builds a CPE 2.3 string from vendor/product/version scan fields.
///
/// Vendor and product are lowercased with spaces replaced by underscores;
/// the version passes through unchanged.
pub fn build_cpe(vendor: &str, product: &str, version: &str) -> String {
    format!(
        "cpe:2.3:a:{}:{}:{}:*:*:*:*:*:*:*",
        sanitize(vendor),
        sanitize(product),
        version
    )
}

fn sanitize(value: &str) -> String {
    value.to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purl_is_verbatim() {
        assert_eq!(
            make_purl(Ecosystem::Npm, "Left-Pad", "1.0.0"),
            "pkg:npm/Left-Pad@1.0.0"
        );
        assert_eq!(
            make_purl(Ecosystem::Maven, "org.apache:commons-lang3", "unknown"),
            "pkg:maven/org.apache:commons-lang3@unknown"
        );
    }

    #[test]
    fn dependency_cpe_duplicates_name() {
        assert_eq!(
            dependency_cpe("left-pad", "1.0.0"),
            "cpe:2.3:a:left-pad:left-pad:1.0.0:*:*:*:*:*:*:*"
        );
    }

    #[test]
    fn dependency_cpe_does_not_sanitize() {
        // Raw pass-through, unlike build_cpe.
        assert_eq!(
            dependency_cpe("My Lib", "2.0"),
            "cpe:2.3:a:My Lib:My Lib:2.0:*:*:*:*:*:*:*"
        );
    }

    #[test]
    fn build_cpe_sanitizes_vendor_and_product() {
        assert_eq!(
            build_cpe("Micro Soft", "Office Suite", "16.0"),
            "cpe:2.3:a:micro_soft:office_suite:16.0:*:*:*:*:*:*:*"
        );
    }

    #[test]
    fn build_cpe_is_idempotent() {
        let a = build_cpe("Acme Corp", "Widget", "1.2");
        let b = build_cpe("Acme Corp", "Widget", "1.2");
        assert_eq!(a, b);
    }

    #[test]
    fn build_cpe_version_passes_through() {
        assert_eq!(
            build_cpe("vendor", "product", "1.0 Beta"),
            "cpe:2.3:a:vendor:product:1.0 Beta:*:*:*:*:*:*:*"
        );
    }
}
