//! Built-in records served when the store is absent or a query fails

use crate::types::{Education, Profile, Project, Service, ServiceTier, SocialLink, Skill};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            title: "Portfolio Website".into(),
            description: "A personal portfolio website built with Next.js and Go".into(),
            image: "/images/projects/portfolio.jpg".into(),
            github_url: "https://github.com/yourusername/portfolio".into(),
            demo_url: String::new(),
            technologies: strings(&["Next.js", "Go", "Tailwind CSS", "Supabase"]),
            ..Default::default()
        },
        Project {
            id: 2,
            title: "Crystals-Kyber with AES Integration".into(),
            description: "Post-quantum cryptography implementation with AES for enhanced security"
                .into(),
            image: "/images/projects/cryptography.jpg".into(),
            github_url: "coming-soon".into(),
            demo_url: String::new(),
            technologies: strings(&["Go", "Cryptography", "AES", "Kyber"]),
            ..Default::default()
        },
    ]
}

/// Fallback project with the given id, or the empty project when the id
/// does not parse or matches nothing
pub fn project(id: &str) -> Project {
    let Ok(id) = id.parse::<i64>() else {
        return Project::default();
    };

    projects()
        .into_iter()
        .find(|project| project.id == id)
        .unwrap_or_default()
}

pub fn profile() -> Profile {
    Profile {
        name: "Your Name".into(),
        title: "Full-stack Developer & Cryptography Enthusiast".into(),
        description: "Specializing in Next.js, Golang, and Post-Quantum Cryptography".into(),
        avatar: "/images/profile/avatar.jpg".into(),
        skills: vec![
            Skill {
                category: "Frontend".into(),
                items: strings(&["HTML/CSS", "JavaScript", "React", "Next.js", "Tailwind CSS"]),
            },
            Skill {
                category: "Backend".into(),
                items: strings(&["Go", "Node.js", "Express", "RESTful APIs", "GraphQL"]),
            },
            Skill {
                category: "Database".into(),
                items: strings(&["PostgreSQL", "MongoDB", "Supabase", "Firebase"]),
            },
            Skill {
                category: "Cryptography".into(),
                items: strings(&["AES", "RSA", "Post-Quantum", "Kyber", "Dilithium"]),
            },
        ],
        education: vec![
            Education {
                degree: "Master of Science in Cryptography".into(),
                institution: "Tech University".into(),
                year: "2018".into(),
            },
            Education {
                degree: "Bachelor of Computer Science".into(),
                institution: "State University".into(),
                year: "2016".into(),
            },
        ],
        interests: strings(&[
            "Cryptography",
            "Web Security",
            "Quantum Computing",
            "Open Source",
            "Blockchain",
            "AI",
            "Reading",
            "Hiking",
        ]),
        social_links: vec![
            social("GitHub", "https://github.com/yourusername"),
            social("LinkedIn", "https://linkedin.com/in/yourusername"),
            social("Email", "mailto:your.email@example.com"),
            social("WhatsApp", "https://wa.me/6287747755257"),
        ],
    }
}

fn social(platform: &str, url: &str) -> SocialLink {
    SocialLink {
        platform: platform.into(),
        url: url.into(),
    }
}

pub fn services() -> Vec<Service> {
    vec![
        Service {
            id: 1,
            title: "Website Development".into(),
            description: "Custom website development services for individuals and businesses"
                .into(),
            icon: "🌐".into(),
            tiers: vec![
                ServiceTier {
                    id: 1,
                    name: "Basic".into(),
                    price: 1500,
                    period: "one-time".into(),
                    features: strings(&[
                        "5 pages",
                        "14 days delivery",
                        "Free domain",
                        "1GB hosting",
                        "Business email",
                        "SSL certificate",
                        "Basic SEO",
                        "30 days support",
                    ]),
                    popular: false,
                },
                ServiceTier {
                    id: 2,
                    name: "Pro".into(),
                    price: 3000,
                    period: "one-time".into(),
                    features: strings(&[
                        "10 pages",
                        "21 days delivery",
                        "Free domain",
                        "Unlimited hosting",
                        "Business email",
                        "SSL certificate",
                        "Advanced SEO",
                        "Logo design",
                        "90 days support",
                    ]),
                    popular: true,
                },
            ],
        },
        Service {
            id: 2,
            title: "AES Integration for Website Security".into(),
            description: "Enhance your website security with AES encryption".into(),
            icon: "🔒".into(),
            tiers: vec![
                ServiceTier {
                    id: 3,
                    name: "Basic".into(),
                    price: 2000,
                    period: "one-time".into(),
                    features: strings(&[
                        "AES-128 encryption",
                        "Form data protection",
                        "Basic security audit",
                        "Implementation documentation",
                        "60 days support",
                    ]),
                    popular: false,
                },
                ServiceTier {
                    id: 4,
                    name: "Advanced".into(),
                    price: 3500,
                    period: "one-time".into(),
                    features: strings(&[
                        "AES-256 encryption",
                        "Full website encryption",
                        "Comprehensive security audit",
                        "Implementation documentation",
                        "User authentication security",
                        "120 days support",
                    ]),
                    popular: true,
                },
            ],
        },
    ]
}
