//! Editorial content behind the programme pages: projects, solutions,
//! the content library, impact stories, the education portal and the
//! connection guide.
//!
//! The catalogue is compiled in. Pages only filter and select from it.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Planning,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Planning => "planning",
            ProjectStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub location: &'static str,
    pub status: ProjectStatus,
    pub users: u64,
    pub description: &'static str,
    pub partner: &'static str,
    pub target_audience: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub title: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub impact: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrganisationBenefit {
    pub title: &'static str,
    pub description: &'static str,
    pub metrics: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentItem {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub views: u64,
    pub avg_minutes: f64,
    pub target_region: &'static str,
    pub publish_date: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImpactStory {
    pub country: &'static str,
    pub title: &'static str,
    pub investment: &'static str,
    pub impact: &'static str,
    pub description: &'static str,
    pub details: &'static [&'static str],
    pub sources: &'static [&'static str],
}

/// One entry of an education portal tab. Fields that a tab does not use
/// stay empty.
#[derive(Debug, Clone, Serialize)]
pub struct PortalEntry {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub tag: &'static str,
    pub detail: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortalTab {
    pub id: &'static str,
    pub name: &'static str,
    pub entries: &'static [PortalEntry],
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessPoint {
    pub name: &'static str,
    pub address: &'static str,
    pub hours: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectRegion {
    pub id: &'static str,
    pub name: &'static str,
    pub hubs: &'static [AccessPoint],
    pub instructions: &'static [&'static str],
}

pub const PROJECTS: &[Project] = &[
    Project {
        id: "1",
        title: "Kibera Digital Bridge",
        location: "Kibera, Nairobi, Kenya",
        status: ProjectStatus::Active,
        users: 1850,
        description: "Providing free Wi-Fi and digital literacy training to Kenya's largest urban slum",
        partner: "Kenya ICT Authority",
        target_audience: &["Youth", "Women", "Small Business Owners"],
    },
    Project {
        id: "2",
        title: "Bungoma Community Connect",
        location: "Bungoma County, Kenya",
        status: ProjectStatus::Active,
        users: 1240,
        description: "Rural connectivity hub serving farming communities with agricultural information",
        partner: "Kenya Agricultural Board",
        target_audience: &["Farmers", "Rural Communities", "Youth"],
    },
    Project {
        id: "3",
        title: "Kisumu Hospital Wi-Fi Access",
        location: "Kisumu, Kenya",
        status: ProjectStatus::Active,
        users: 890,
        description: "Free Wi-Fi for patients and families with health education content",
        partner: "Ministry of Health Kenya",
        target_audience: &["Patients", "Healthcare Workers", "Families"],
    },
    Project {
        id: "4",
        title: "Nyeri Market Public Wi-Fi",
        location: "Nyeri Town, Kenya",
        status: ProjectStatus::Active,
        users: 2100,
        description: "Market-based Wi-Fi hub connecting traders with digital payment systems",
        partner: "Nyeri County Government",
        target_audience: &["Traders", "Small Business Owners", "Customers"],
    },
    Project {
        id: "5",
        title: "Kampala University Wi-Fi",
        location: "Kampala, Uganda",
        status: ProjectStatus::Active,
        users: 3200,
        description: "Campus-wide free Wi-Fi supporting 5,000+ students with educational resources",
        partner: "Uganda Communications Commission",
        target_audience: &["Students", "Faculty", "Researchers"],
    },
    Project {
        id: "6",
        title: "Aiyetoro-Gbede Digital Hub",
        location: "Kogi State, Nigeria",
        status: ProjectStatus::Active,
        users: 1560,
        description: "Rural town connectivity with focus on youth empowerment and digital skills",
        partner: "Nigeria ICT Development Agency",
        target_audience: &["Youth", "Students", "Entrepreneurs"],
    },
    Project {
        id: "7",
        title: "Ota Community Connect",
        location: "Ogun State, Nigeria",
        status: ProjectStatus::Active,
        users: 2800,
        description: "Industrial town Wi-Fi hub supporting workers and families",
        partner: "Ogun State Government",
        target_audience: &["Industrial Workers", "Families", "Students"],
    },
    Project {
        id: "8",
        title: "Digital Roots Dilla",
        location: "Dilla, Ethiopia",
        status: ProjectStatus::Active,
        users: 1800,
        description: "Coffee-producing region hub with agricultural extension and market access",
        partner: "Ethiopian Coffee & Tea Authority",
        target_audience: &["Coffee Farmers", "Students", "Health Workers"],
    },
    Project {
        id: "9",
        title: "Smart Villages Nyagatare",
        location: "Nyagatare, Rwanda",
        status: ProjectStatus::Active,
        users: 2500,
        description: "Government smart village initiative with agricultural and business focus",
        partner: "Rwanda Development Board",
        target_audience: &["Farmers", "Students", "Entrepreneurs"],
    },
    Project {
        id: "10",
        title: "Mthatha Wi-Connect Project",
        location: "Mthatha, Eastern Cape, South Africa",
        status: ProjectStatus::Active,
        users: 3000,
        description: "University town connectivity supporting education and healthcare access",
        partner: "Eastern Cape Provincial Government",
        target_audience: &["University Students", "Healthcare Workers", "Local Vendors"],
    },
    Project {
        id: "11",
        title: "Kédougou Access4All Program",
        location: "Kédougou, Senegal",
        status: ProjectStatus::Active,
        users: 1200,
        description: "Mining and eco-tourism region connectivity with cross-border trade access",
        partner: "Senegal Ministry of Digital Economy",
        target_audience: &["Miners", "Tourists", "Cross-border Traders"],
    },
    Project {
        id: "12",
        title: "Kakuma Refugee Hub",
        location: "Kakuma Refugee Camp, Kenya",
        status: ProjectStatus::Planning,
        users: 0,
        description: "Comprehensive digital access for refugee education and communication",
        partner: "UNHCR",
        target_audience: &["Refugees", "Students", "Families"],
    },
];

/// Countries offered by the project country filter.
pub const PROJECT_COUNTRIES: &[&str] = &[
    "Kenya",
    "Nigeria",
    "Uganda",
    "Ethiopia",
    "Rwanda",
    "Senegal",
    "South Africa",
];

pub const SOLUTIONS: &[Solution] = &[
    Solution {
        title: "Youth Digital Empowerment",
        description: "Comprehensive digital literacy programs targeting 18-35 age group across Africa",
        features: &[
            "Free Wi-Fi access in youth centers and universities",
            "Digital skills training and certification programs",
            "Online job placement and career guidance",
            "Entrepreneurship support and mentorship",
            "Access to global educational resources",
        ],
        impact: "2.4M+ youth reached across 7 countries",
    },
    Solution {
        title: "Healthcare Access Solutions",
        description: "Telemedicine and health information delivery to underserved communities",
        features: &[
            "Telemedicine consultations in rural clinics",
            "Health education content in local languages",
            "Vaccination and health campaign coordination",
            "Medical record digitization and management",
            "Emergency health information access",
        ],
        impact: "890K+ patients served, 45% improvement in health outcomes",
    },
    Solution {
        title: "Agricultural Innovation Hub",
        description: "Smart farming solutions and market access for rural farmers",
        features: &[
            "Weather forecasting and crop advisory services",
            "Market price information and trading platforms",
            "Agricultural extension services via video",
            "Farmer-to-farmer knowledge sharing networks",
            "Access to agricultural financing and insurance",
        ],
        impact: "156K+ farmers connected, 34% increase in crop yields",
    },
    Solution {
        title: "Women Economic Empowerment",
        description: "Digital tools and resources specifically designed for women entrepreneurs",
        features: &[
            "Women-only digital literacy classes",
            "Microfinance and business loan access",
            "Online marketplace for women-made products",
            "Childcare coordination during training sessions",
            "Mentorship networks and peer support groups",
        ],
        impact: "78K+ women entrepreneurs supported, 67% business growth",
    },
    Solution {
        title: "Education Technology Platform",
        description: "Comprehensive e-learning solutions for schools and communities",
        features: &[
            "Offline-capable educational content delivery",
            "Teacher training and professional development",
            "Student assessment and progress tracking",
            "Parent-teacher communication platforms",
            "Integration with national curriculum standards",
        ],
        impact: "1.2M+ students reached, 89% improvement in test scores",
    },
    Solution {
        title: "Community Safety & Security",
        description: "Digital tools for community safety and emergency response",
        features: &[
            "Emergency alert and notification systems",
            "Community reporting and feedback platforms",
            "Digital identity and documentation services",
            "Safety education and awareness campaigns",
            "Coordination with local law enforcement",
        ],
        impact: "340K+ community members protected, 56% reduction in incidents",
    },
];

pub const ORGANISATION_BENEFITS: &[OrganisationBenefit] = &[
    OrganisationBenefit {
        title: "Real-Time Impact Measurement",
        description: "Track program effectiveness with live analytics and community feedback",
        metrics: &[
            "User engagement rates",
            "Content consumption patterns",
            "Behavioral change indicators",
            "ROI on digital investments",
        ],
    },
    OrganisationBenefit {
        title: "Scalable Infrastructure",
        description: "Cloud-based platform that grows with your programs across multiple countries",
        metrics: &[
            "Auto-scaling capabilities",
            "Multi-language support",
            "Regional customization",
            "Partner integration APIs",
        ],
    },
    OrganisationBenefit {
        title: "Data-Driven Decision Making",
        description: "Comprehensive analytics to optimize program delivery and resource allocation",
        metrics: &[
            "Predictive analytics",
            "Usage pattern analysis",
            "Cost-per-beneficiary tracking",
            "Impact forecasting",
        ],
    },
    OrganisationBenefit {
        title: "Community Engagement Tools",
        description: "Built-in features to foster community participation and feedback",
        metrics: &[
            "Survey and feedback systems",
            "Community forums",
            "Peer-to-peer learning",
            "Local content creation",
        ],
    },
];

pub const CONTENT_LIBRARY: &[ContentItem] = &[
    ContentItem {
        id: "1",
        title: "Empowering African Youth Through Technology",
        kind: "video",
        category: "youth",
        description: "How digital access transforms opportunities for young people across Africa",
        views: 12_500,
        avg_minutes: 4.2,
        target_region: "Kenya",
        publish_date: "2024-01-15",
    },
    ContentItem {
        id: "2",
        title: "Digital Health Solutions for Rural Communities",
        kind: "article",
        category: "health",
        description: "Innovative healthcare delivery through connected access hubs",
        views: 8_900,
        avg_minutes: 6.8,
        target_region: "Nigeria",
        publish_date: "2024-01-10",
    },
    ContentItem {
        id: "3",
        title: "Women Entrepreneurs: Success Stories from Connected Hubs",
        kind: "video",
        category: "women",
        description: "Real stories of women building businesses through digital access",
        views: 15_600,
        avg_minutes: 5.1,
        target_region: "Rwanda",
        publish_date: "2024-01-08",
    },
];

pub const IMPACT_STORIES: &[ImpactStory] = &[
    ImpactStory {
        country: "Kenya",
        title: "M-PESA Mobile Money Revolution",
        investment: "$70M+",
        impact: "194,000 households lifted from poverty",
        description: "Foundation funding helped M-PESA increase per-capita consumption and transform agricultural value chains across Kenya.",
        details: &[
            "Mobile payments facilitated farm payments and market links",
            "Rigorous research confirmed poverty reduction impact",
            "Improved financial inclusion for farmers and families",
            "Created foundation for digital agriculture platforms",
        ],
        sources: &["Wired 2015", "Wikipedia", "ICT Research Reviews"],
    },
    ImpactStory {
        country: "Senegal",
        title: "mRNA Vaccine Manufacturing Hub",
        investment: "$40M",
        impact: "First African mRNA vaccine facility",
        description: "Partnership with Institut Pasteur de Dakar developing mRNA vaccines for Rift Valley fever and other diseases.",
        details: &[
            "Dr. Marie-Angélique Sène leading mRNA vaccine development",
            "$1.8M grant for WHO pre-qualification maintenance",
            "Local production of measles and rubella vaccines",
            "Training healthcare workers through MADIBA program",
        ],
        sources: &["AP News 2023", "Gates Foundation", "Institut Pasteur"],
    },
];

pub const PORTAL_TABS: &[PortalTab] = &[
    PortalTab {
        id: "jobs",
        name: "Job Portal",
        entries: &[
            PortalEntry {
                title: "Data Entry Clerk",
                subtitle: "Nairobi Tech Solutions · Nairobi",
                tag: "Part-time",
                detail: "KSh 25,000/month · posted 2 days ago",
            },
            PortalEntry {
                title: "Community Health Worker",
                subtitle: "Kenya Health Initiative · Kibera",
                tag: "Full-time",
                detail: "KSh 35,000/month · posted 1 week ago",
            },
            PortalEntry {
                title: "Mobile Money Agent",
                subtitle: "M-Pesa · Various Locations",
                tag: "Commission",
                detail: "Commission-based · posted 3 days ago",
            },
        ],
    },
    PortalTab {
        id: "health",
        name: "Health Bulletins",
        entries: &[
            PortalEntry {
                title: "Malaria Prevention During Rainy Season",
                subtitle: "2024-01-15",
                tag: "Prevention",
                detail: "Essential tips for protecting your family during the rainy season",
            },
            PortalEntry {
                title: "Free Vaccination Drive - February 2024",
                subtitle: "2024-01-10",
                tag: "Vaccination",
                detail: "Community vaccination schedule for children under 5",
            },
            PortalEntry {
                title: "Mental Health Support Resources",
                subtitle: "2024-01-08",
                tag: "Mental Health",
                detail: "Local counseling services and support groups available",
            },
        ],
    },
    PortalTab {
        id: "farming",
        name: "Farming Guides",
        entries: &[
            PortalEntry {
                title: "Drought-Resistant Crops for 2024",
                subtitle: "Dry Season",
                tag: "Crop Selection",
                detail: "Best crop varieties for water-scarce conditions",
            },
            PortalEntry {
                title: "Organic Fertilizer Production",
                subtitle: "All Seasons",
                tag: "Soil Management",
                detail: "Make your own fertilizer using local materials",
            },
            PortalEntry {
                title: "Market Prices - January 2024",
                subtitle: "Current",
                tag: "Market Info",
                detail: "Latest commodity prices in Nairobi markets",
            },
        ],
    },
    PortalTab {
        id: "alerts",
        name: "Misinformation Alerts",
        entries: &[
            PortalEntry {
                title: "False COVID-19 Treatment Claims",
                subtitle: "2024-01-14",
                tag: "High",
                detail: "Beware of unverified treatments being shared on social media",
            },
            PortalEntry {
                title: "Fake Government Benefit Programs",
                subtitle: "2024-01-12",
                tag: "Medium",
                detail: "Verify all government programs through official channels",
            },
        ],
    },
];

pub const CONNECT_REGIONS: &[ConnectRegion] = &[
    ConnectRegion {
        id: "nairobi",
        name: "Nairobi Region",
        hubs: &[
            AccessPoint {
                name: "Kibera Community Hub",
                address: "Olympic Primary School, Kibera",
                hours: "6:00 AM - 10:00 PM",
            },
            AccessPoint {
                name: "Mathare Digital Center",
                address: "Mathare Social Hall",
                hours: "7:00 AM - 9:00 PM",
            },
            AccessPoint {
                name: "Eastlands Connect",
                address: "Umoja Community Center",
                hours: "8:00 AM - 8:00 PM",
            },
        ],
        instructions: &[
            "Look for the \"ConnectedHub-Nairobi\" network on your device",
            "Connect and open your web browser",
            "Complete a quick 2-minute survey about your needs",
            "Enjoy 3 hours of free internet access",
            "Access renews automatically every 3 hours",
        ],
    },
    ConnectRegion {
        id: "coast",
        name: "Coast Region",
        hubs: &[
            AccessPoint {
                name: "Mombasa Port Hub",
                address: "Mombasa Community Center",
                hours: "6:00 AM - 11:00 PM",
            },
            AccessPoint {
                name: "Malindi Beach Connect",
                address: "Malindi Library",
                hours: "8:00 AM - 6:00 PM",
            },
        ],
        instructions: &[
            "Connect to \"ConnectedHub-Coast\" Wi-Fi network",
            "Open browser and watch a 30-second community ad",
            "Read one health or farming tip (2 minutes)",
            "Get 2 hours of free internet access",
            "Renew by viewing new content every 2 hours",
        ],
    },
    ConnectRegion {
        id: "northern",
        name: "Northern Kenya",
        hubs: &[
            AccessPoint {
                name: "Kakuma Refugee Hub",
                address: "Kakuma Refugee Camp, Block 3",
                hours: "7:00 AM - 9:00 PM",
            },
            AccessPoint {
                name: "Turkana Connect",
                address: "Lodwar Town Hall",
                hours: "8:00 AM - 7:00 PM",
            },
        ],
        instructions: &[
            "Find \"ConnectedHub-North\" in your Wi-Fi settings",
            "Connect and complete identity verification",
            "Participate in a community feedback survey",
            "Access educational content for 4 hours",
            "Automatic renewal with daily check-in",
        ],
    },
];

/// Projects matching a free-text search over title and location, an exact
/// status and a country contained in the location. `None` skips a filter.
pub fn filter_projects(
    q: Option<&str>,
    status: Option<&str>,
    country: Option<&str>,
) -> Vec<&'static Project> {
    let q_lower = q.map(str::to_lowercase);
    PROJECTS
        .iter()
        .filter(|p| {
            let mut matches = true;

            if let Some(ref q) = q_lower {
                matches &= p.title.to_lowercase().contains(q)
                    || p.location.to_lowercase().contains(q);
            }

            if let Some(s) = status {
                matches &= p.status.as_str().eq_ignore_ascii_case(s);
            }

            if let Some(c) = country {
                matches &= p.location.contains(c);
            }

            matches
        })
        .collect()
}

/// Looks up a portal tab, falling back to the first one.
pub fn portal_tab(id: Option<&str>) -> &'static PortalTab {
    id.and_then(|id| PORTAL_TABS.iter().find(|t| t.id == id))
        .unwrap_or(&PORTAL_TABS[0])
}

/// Looks up a connection region, falling back to Nairobi.
pub fn connect_region(id: Option<&str>) -> &'static ConnectRegion {
    id.and_then(|id| CONNECT_REGIONS.iter().find(|r| r.id == id))
        .unwrap_or(&CONNECT_REGIONS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    mod project_filter_tests {
        use super::*;

        #[test]
        fn test_no_filters_returns_everything() {
            assert_eq!(filter_projects(None, None, None).len(), PROJECTS.len());
        }

        #[test]
        fn test_search_is_case_insensitive_over_title_and_location() {
            let by_title = filter_projects(Some("KIBERA"), None, None);
            assert_eq!(by_title.len(), 1);
            assert_eq!(by_title[0].id, "1");

            let by_location = filter_projects(Some("ogun"), None, None);
            assert_eq!(by_location.len(), 1);
            assert_eq!(by_location[0].title, "Ota Community Connect");
        }

        #[test]
        fn test_status_and_country_combine() {
            let planning_kenya = filter_projects(None, Some("planning"), Some("Kenya"));
            assert_eq!(planning_kenya.len(), 1);
            assert_eq!(planning_kenya[0].id, "12");

            assert!(filter_projects(None, Some("completed"), None).is_empty());
            assert!(filter_projects(None, None, Some("Nigeria"))
                .iter()
                .all(|p| p.location.contains("Nigeria")));
        }
    }

    mod lookup_tests {
        use super::*;

        #[test]
        fn test_portal_tab_falls_back_to_jobs() {
            assert_eq!(portal_tab(None).id, "jobs");
            assert_eq!(portal_tab(Some("nope")).id, "jobs");
            assert_eq!(portal_tab(Some("alerts")).name, "Misinformation Alerts");
        }

        #[test]
        fn test_connect_region_falls_back_to_nairobi() {
            assert_eq!(connect_region(None).id, "nairobi");
            assert_eq!(connect_region(Some("coast")).hubs.len(), 2);
            assert_eq!(connect_region(Some("mars")).id, "nairobi");
        }
    }
}
