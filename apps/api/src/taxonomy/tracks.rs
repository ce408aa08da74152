use super::{
    CareerPath, CourseResource, DifficultyTier, Milestone, PathId, SkillCategory,
    TimelinePhase, TrackProfile,
};

const fn phase(phase: &'static str, duration: &'static str, focus: &'static str) -> TimelinePhase {
    TimelinePhase {
        phase,
        duration,
        focus,
    }
}

const fn skills(category: &'static str, skills: &'static [&'static str]) -> SkillCategory {
    SkillCategory { category, skills }
}

const fn milestone(title: &'static str, points: u32) -> Milestone {
    Milestone { title, points }
}

const fn course(
    platform: &'static str,
    title: &'static str,
    duration: &'static str,
    rating: f32,
) -> CourseResource {
    CourseResource {
        platform,
        title,
        duration,
        rating,
    }
}

pub static TRACKS: [TrackProfile; 4] = [
    TrackProfile {
        path: CareerPath {
            id: PathId::AiMl,
            title: "AI/Machine Learning Specialist",
            description: "Become an expert in artificial intelligence and machine learning technologies",
            color_tag: "#7c3aed",
            duration_estimate: "12-18 months",
            salary_band: "₹8-25 LPA",
            growth_rate: "+35%",
            difficulty_tier: DifficultyTier::Advanced,
        },
        skill_map: &[
            skills("Core", &["Python", "NumPy", "Pandas", "Scikit-learn", "TensorFlow", "PyTorch"]),
            skills("Math", &["Linear Algebra", "Calculus", "Statistics", "Probability"]),
            skills("Tools", &["Jupyter Notebook", "Git", "Docker", "AWS/GCP", "MLflow"]),
            skills("Specialization", &["Computer Vision", "NLP", "Deep Learning", "MLOps"]),
        ],
        timeline: &[
            phase("Foundation", "2-3 months", "Python, Math, Statistics"),
            phase("Core ML", "3-4 months", "Machine Learning Algorithms"),
            phase("Deep Learning", "3-4 months", "Neural Networks, TensorFlow"),
            phase("Specialization", "3-4 months", "Computer Vision or NLP"),
            phase("Projects & Portfolio", "1-2 months", "Real-world projects"),
        ],
        milestones: &[
            milestone("Complete Python Fundamentals", 100),
            milestone("Build First ML Model", 200),
            milestone("Deep Learning Project", 300),
            milestone("Industry Certification", 250),
            milestone("Portfolio Deployment", 150),
        ],
        courses: &[
            course("Coursera", "Machine Learning by Andrew Ng", "11 weeks", 4.9),
            course("Coursera", "Deep Learning Specialization", "4 months", 4.8),
            course("NPTEL", "Intro to Machine Learning", "12 weeks", 4.7),
            course("Swayam", "Artificial Intelligence", "8 weeks", 4.6),
        ],
    },
    TrackProfile {
        path: CareerPath {
            id: PathId::DataScience,
            title: "Data Scientist",
            description: "Extract insights from data to drive business decisions and solve complex problems",
            color_tag: "#0284c7",
            duration_estimate: "8-12 months",
            salary_band: "₹6-20 LPA",
            growth_rate: "+31%",
            difficulty_tier: DifficultyTier::Intermediate,
        },
        skill_map: &[
            skills("Core", &["Python", "SQL", "Pandas", "NumPy", "Scikit-learn", "Statistics"]),
            skills("Visualization", &["Matplotlib", "Seaborn", "Plotly", "Tableau", "Power BI"]),
            skills("Tools", &["Jupyter", "Git", "Excel", "Apache Spark"]),
            skills("Specialization", &["Time Series", "A/B Testing", "Feature Engineering", "Model Deployment"]),
        ],
        timeline: &[
            phase("Foundation", "2-3 months", "Python, SQL, Statistics"),
            phase("Data Analysis", "2-3 months", "Pandas, NumPy, Data Cleaning"),
            phase("Visualization", "1-2 months", "Matplotlib, Seaborn, Plotly"),
            phase("Machine Learning", "2-3 months", "Scikit-learn, Model Building"),
            phase("Advanced Tools", "1-2 months", "Spark, Cloud Platforms"),
        ],
        milestones: &[
            milestone("Data Analysis Mastery", 150),
            milestone("Statistical Analysis", 200),
            milestone("ML Implementation", 250),
            milestone("Data Visualization Expert", 150),
            milestone("Business Impact Project", 300),
        ],
        courses: &[
            course("Coursera", "Data Science by Johns Hopkins", "6 months", 4.7),
            course("Coursera", "Applied Data Science with Python", "4 months", 4.8),
            course("NPTEL", "Data Science for Engineers", "12 weeks", 4.6),
            course("Swayam", "Introduction to Data Analytics", "8 weeks", 4.5),
        ],
    },
    TrackProfile {
        path: CareerPath {
            id: PathId::Fullstack,
            title: "Full Stack Developer",
            description: "Build complete web applications from frontend to backend",
            color_tag: "#059669",
            duration_estimate: "6-10 months",
            salary_band: "₹4-15 LPA",
            growth_rate: "+13%",
            difficulty_tier: DifficultyTier::Intermediate,
        },
        skill_map: &[
            skills("Frontend", &["HTML", "CSS", "JavaScript", "React", "TypeScript", "Tailwind CSS"]),
            skills("Backend", &["Node.js", "Express.js", "Python/Django", "REST APIs", "GraphQL"]),
            skills("Database", &["MongoDB", "PostgreSQL", "Redis", "Database Design"]),
            skills("Tools", &["Git", "Docker", "AWS", "Testing", "CI/CD"]),
        ],
        timeline: &[
            phase("Frontend Basics", "2-3 months", "HTML, CSS, JavaScript"),
            phase("React Development", "2-3 months", "React, State Management"),
            phase("Backend Development", "2-3 months", "Node.js, Express, APIs"),
            phase("Database & DevOps", "1-2 months", "MongoDB, Git, Deployment"),
            phase("Full Stack Projects", "1-2 months", "End-to-end applications"),
        ],
        milestones: &[
            milestone("Frontend Proficiency", 150),
            milestone("API Development", 200),
            milestone("Database Integration", 150),
            milestone("Full Stack Application", 300),
            milestone("Production Deployment", 200),
        ],
        courses: &[
            course("Coursera", "Full-Stack with React", "4 months", 4.7),
            course("Coursera", "Web Applications for Everybody", "6 months", 4.8),
            course("NPTEL", "Data Structures & Algorithms", "12 weeks", 4.8),
            course("Swayam", "Web Development", "10 weeks", 4.5),
        ],
    },
    TrackProfile {
        path: CareerPath {
            id: PathId::Cybersecurity,
            title: "Cybersecurity Specialist",
            description: "Protect systems and data from cyber threats",
            color_tag: "#dc2626",
            duration_estimate: "10-14 months",
            salary_band: "₹6-18 LPA",
            growth_rate: "+25%",
            difficulty_tier: DifficultyTier::Advanced,
        },
        skill_map: &[
            skills("Core", &["Network Security", "Cryptography", "Firewalls", "IDS/IPS"]),
            skills("Offensive", &["Penetration Testing", "Kali Linux", "Metasploit", "Burp Suite"]),
            skills("Defensive", &["SIEM", "Incident Response", "Forensics", "Malware Analysis"]),
            skills("Compliance", &["ISO 27001", "NIST", "GDPR", "Risk Assessment"]),
        ],
        timeline: &[
            phase("Networking Basics", "2-3 months", "TCP/IP, DNS, Firewalls"),
            phase("Security Fundamentals", "2-3 months", "Cryptography, Protocols"),
            phase("Ethical Hacking", "3-4 months", "Penetration Testing, Kali Linux"),
            phase("Compliance & GRC", "1-2 months", "ISO 27001, NIST, GDPR"),
            phase("Capstone Project", "1-2 months", "Security Audit & Report"),
        ],
        milestones: &[
            milestone("Network Security Basics", 150),
            milestone("First Pen Test", 200),
            milestone("Security Certification", 300),
            milestone("Incident Response Plan", 200),
            milestone("Security Audit Report", 250),
        ],
        courses: &[
            course("Coursera", "Google Cybersecurity Certificate", "6 months", 4.8),
            course("Coursera", "IBM Cybersecurity Analyst", "4 months", 4.6),
            course("NPTEL", "Network Security", "12 weeks", 4.5),
            course("Swayam", "Cyber Security Fundamentals", "8 weeks", 4.4),
        ],
    },
];
