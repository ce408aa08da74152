//! Question Bank: the fixed, ordered set of assessment questions.
//!
//! Loaded once per process and shared read-only between attempts.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Technical,
    Aptitude,
    Interest,
    Personality,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: u32,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub category: &'static str,
    pub prompt: &'static str,
    pub options: &'static [AnswerOption],
}

impl Question {
    /// True when `value` is one of this question's option tokens.
    pub fn accepts(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The standard 12-question career assessment.
    pub fn standard() -> Self {
        Self::new(STANDARD_QUESTIONS.to_vec())
    }

    pub fn get(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

const fn opt(value: &'static str, label: &'static str) -> AnswerOption {
    AnswerOption { value, label }
}

const STANDARD_QUESTIONS: &[Question] = &[
    Question {
        id: 1,
        question_type: QuestionType::Technical,
        category: "Programming",
        prompt: "Which programming language would you be most interested in learning or improving?",
        options: &[
            opt("python", "Python (Data Science, AI, Web Development)"),
            opt("javascript", "JavaScript (Web Development, Frontend)"),
            opt("java", "Java (Enterprise, Android Development)"),
            opt("cpp", "C++ (Systems Programming, Game Development)"),
            opt("none", "I'm not interested in programming"),
        ],
    },
    Question {
        id: 2,
        question_type: QuestionType::Technical,
        category: "Problem Solving",
        prompt: "You need to find the most efficient route between two cities. What approach would you take?",
        options: &[
            opt("algorithm", "Use a pathfinding algorithm like Dijkstra's"),
            opt("map-service", "Use an existing map service API"),
            opt("heuristic", "Apply heuristic methods and optimization"),
            opt("research", "Research existing solutions and adapt them"),
        ],
    },
    Question {
        id: 3,
        question_type: QuestionType::Aptitude,
        category: "Logical Reasoning",
        prompt: "If all roses are flowers, and some flowers are red, which statement is definitely true?",
        options: &[
            opt("all-roses-red", "All roses are red"),
            opt("some-roses-red", "Some roses are red"),
            opt("all-red-roses", "All red things are roses"),
            opt("some-roses-flowers", "Some roses are flowers"),
        ],
    },
    Question {
        id: 4,
        question_type: QuestionType::Interest,
        category: "Career Preference",
        prompt: "Which type of work environment appeals to you most?",
        options: &[
            opt("individual", "Working independently on complex problems"),
            opt("team", "Collaborating with diverse teams"),
            opt("leadership", "Leading projects and making decisions"),
            opt("creative", "Creative and design-focused work"),
        ],
    },
    Question {
        id: 5,
        question_type: QuestionType::Technical,
        category: "Data Analysis",
        prompt: "You have a large dataset and need to find patterns. What would be your first step?",
        options: &[
            opt("visualize", "Create visualizations to understand the data"),
            opt("clean", "Clean and preprocess the data"),
            opt("statistics", "Apply statistical analysis methods"),
            opt("ml", "Use machine learning algorithms"),
        ],
    },
    Question {
        id: 6,
        question_type: QuestionType::Personality,
        category: "Work Style",
        prompt: "When faced with a challenging deadline, you typically:",
        options: &[
            opt("plan", "Create a detailed plan and timeline"),
            opt("focus", "Focus intensely and work through it"),
            opt("collaborate", "Seek help and delegate tasks"),
            opt("prioritize", "Prioritize and potentially negotiate scope"),
        ],
    },
    Question {
        id: 7,
        question_type: QuestionType::Aptitude,
        category: "Pattern Recognition",
        prompt: "What comes next in the sequence: 2, 6, 12, 20, 30, ?",
        options: &[
            opt("42", "42"),
            opt("40", "40"),
            opt("36", "36"),
            opt("45", "45"),
        ],
    },
    Question {
        id: 8,
        question_type: QuestionType::Interest,
        category: "Technology Preference",
        prompt: "Which technological field interests you most?",
        options: &[
            opt("ai-ml", "Artificial Intelligence & Machine Learning"),
            opt("web-mobile", "Web & Mobile Development"),
            opt("data-science", "Data Science & Analytics"),
            opt("cybersecurity", "Cybersecurity & Network Security"),
        ],
    },
    Question {
        id: 9,
        question_type: QuestionType::Technical,
        category: "System Design",
        prompt: "How would you design a system to handle 1 million users?",
        options: &[
            opt("scale-up", "Upgrade to more powerful servers"),
            opt("scale-out", "Distribute across multiple servers"),
            opt("cache", "Implement caching and optimization"),
            opt("cloud", "Use cloud services and auto-scaling"),
        ],
    },
    Question {
        id: 10,
        question_type: QuestionType::Personality,
        category: "Learning Style",
        prompt: "How do you prefer to learn new concepts?",
        options: &[
            opt("hands-on", "Hands-on practice and experimentation"),
            opt("theory", "Understanding theory first, then practice"),
            opt("examples", "Learning through examples and case studies"),
            opt("discussion", "Discussion and collaborative learning"),
        ],
    },
    Question {
        id: 11,
        question_type: QuestionType::Interest,
        category: "Industry Preference",
        prompt: "Which industry would you like to work in?",
        options: &[
            opt("tech", "Technology & Software"),
            opt("finance", "Finance & Fintech"),
            opt("healthcare", "Healthcare & Biotech"),
            opt("education", "Education & EdTech"),
        ],
    },
    Question {
        id: 12,
        question_type: QuestionType::Aptitude,
        category: "Mathematical Reasoning",
        prompt: "If it takes 5 machines 5 minutes to make 5 widgets, how long would it take 100 machines to make 100 widgets?",
        options: &[
            opt("5", "5 minutes"),
            opt("100", "100 minutes"),
            opt("20", "20 minutes"),
            opt("1", "1 minute"),
        ],
    },
];
