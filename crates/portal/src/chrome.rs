//! Home page chrome: feature cards and scroll/resize behaviour.

use serde::Serialize;

/// Scroll offset past which the navbar turns solid.
pub const NAVBAR_SCROLL_THRESHOLD: f64 = 50.0;

/// Viewport width below which the hero buttons stack vertically.
pub const STACKED_HERO_BELOW: u32 = 768;

/// A feature card on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
}

pub const FEATURES: &[Feature] = &[
    Feature {
        icon: "fas fa-calendar-check",
        title: "Leave Management",
        description: "Submit and track leave requests with an intuitive calendar interface. Get instant approvals and maintain perfect attendance records.",
        category: "hr",
    },
    Feature {
        icon: "fas fa-cloud-upload-alt",
        title: "Document Hub",
        description: "Centralized document management system for team resources, policies, and shared files with version control.",
        category: "productivity",
    },
    Feature {
        icon: "fas fa-users",
        title: "Team Directory",
        description: "Find and connect with colleagues across departments. View contact information, roles, and organizational charts.",
        category: "social",
    },
    Feature {
        icon: "fas fa-chart-bar",
        title: "Analytics Dashboard",
        description: "Comprehensive insights into team performance, engagement metrics, and productivity trends with interactive charts.",
        category: "analytics",
    },
    Feature {
        icon: "fas fa-bell",
        title: "Smart Notifications",
        description: "Stay updated with personalized notifications for approvals, deadlines, announcements, and team activities.",
        category: "communication",
    },
    Feature {
        icon: "fas fa-mobile-alt",
        title: "Mobile Ready",
        description: "Access all features on-the-go with our responsive design that works seamlessly across all devices.",
        category: "technology",
    },
];

const DEFAULT_BENEFITS: &[&str] = &[
    "Enhanced productivity",
    "Improved user experience",
    "Seamless integration",
    "Advanced features",
];

/// Selling points listed for a feature category.
#[must_use]
pub fn benefits(category: &str) -> &'static [&'static str] {
    match category {
        "hr" => &[
            "Streamlined approval workflow",
            "Real-time status tracking",
            "Calendar integration",
            "Automated notifications",
        ],
        "productivity" => &[
            "Version control system",
            "Collaborative editing",
            "Advanced search capabilities",
            "Cloud synchronization",
        ],
        "social" => &[
            "Organizational chart view",
            "Contact information management",
            "Skills and expertise tracking",
            "Inter-department communication",
        ],
        "analytics" => &[
            "Real-time performance metrics",
            "Customizable dashboards",
            "Export capabilities",
            "Predictive insights",
        ],
        "communication" => &[
            "Personalized notification preferences",
            "Multi-channel delivery",
            "Priority-based filtering",
            "Integration with external tools",
        ],
        "technology" => &[
            "Cross-platform compatibility",
            "Offline functionality",
            "Progressive web app features",
            "Native mobile experience",
        ],
        _ => DEFAULT_BENEFITS,
    }
}

/// A feature with its benefits, as shown in the detail dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureDetail {
    #[serde(flatten)]
    pub feature: Feature,
    pub benefits: &'static [&'static str],
}

/// Look up a feature by its exact title.
#[must_use]
pub fn feature_detail(title: &str) -> Option<FeatureDetail> {
    FEATURES
        .iter()
        .find(|f| f.title == title)
        .map(|&feature| FeatureDetail {
            feature,
            benefits: benefits(feature.category),
        })
}

/// Whether the navbar uses its scrolled style.
#[must_use]
pub fn navbar_scrolled(scroll_top: f64) -> bool {
    scroll_top > NAVBAR_SCROLL_THRESHOLD
}

/// Whether the hero buttons stack in a column.
#[must_use]
pub const fn hero_stacked(viewport_width: u32) -> bool {
    viewport_width < STACKED_HERO_BELOW
}

/// Vertical offset of the floating card at `index` for a scroll position.
#[must_use]
pub fn parallax_offset(scroll_top: f64, index: u32) -> f64 {
    let speed = 0.05_f64.mul_add(f64::from(index), 0.1);
    -(scroll_top * speed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_six_features_with_benefits() {
        assert_eq!(FEATURES.len(), 6);
        for feature in FEATURES {
            assert_ne!(benefits(feature.category), DEFAULT_BENEFITS);
        }
        assert_eq!(benefits("unknown"), DEFAULT_BENEFITS);
    }

    #[test]
    fn test_feature_detail_lookup() {
        let detail = feature_detail("Document Hub").unwrap();
        assert_eq!(detail.feature.category, "productivity");
        assert_eq!(detail.benefits[0], "Version control system");
        assert!(feature_detail("document hub").is_none());
    }

    #[test]
    fn test_navbar_and_hero_thresholds() {
        assert!(!navbar_scrolled(50.0));
        assert!(navbar_scrolled(50.5));
        assert!(hero_stacked(767));
        assert!(!hero_stacked(768));
    }

    #[test]
    fn test_parallax_offset() {
        assert!((parallax_offset(100.0, 0) + 10.0).abs() < 1e-9);
        assert!((parallax_offset(100.0, 2) + 20.0).abs() < 1e-9);
        assert!(parallax_offset(0.0, 3).abs() < 1e-9);
    }
}
