//! The built-in seven-section capture sequence.
//!
//! Identity, technical profile, learning style, career vision, project
//! experience, networking, personal brand. Each section page of the product
//! is one entry here; the wizard engine interprets them generically.

use super::model::{Question, QuestionKind, Section, SectionId};

/// Ordered set of sections making up the capture flow.
#[derive(Debug, Clone)]
pub struct Catalog {
    sections: Vec<Section>,
}

impl Catalog {
    /// The built-in seven-section flow.
    pub fn builtin() -> Self {
        Self {
            sections: create_builtin_sections(),
        }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// First section of the flow.
    pub fn first(&self) -> Option<&Section> {
        self.sections.first()
    }

    /// Look up a section by id.
    pub fn by_id(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Id of the section following `id` in the fixed sequence.
    ///
    /// `None` when `id` is the last section (the flow is complete) or is not
    /// part of the catalog.
    pub fn next_after(&self, id: &str) -> Option<SectionId> {
        let idx = self.sections.iter().position(|s| s.id == id)?;
        self.sections.get(idx + 1).map(|s| s.id.clone())
    }
}

fn text(min_length: usize, max_length: usize) -> QuestionKind {
    QuestionKind::FreeText {
        min_length,
        max_length,
    }
}

fn multi(max_count: usize) -> QuestionKind {
    QuestionKind::MultiSelect { max_count }
}

fn scale() -> QuestionKind {
    QuestionKind::Scale {
        min: 0,
        max: 100,
        default: 50,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn create_builtin_sections() -> Vec<Section> {
    vec![
        Section {
            id: "identity".into(),
            title: "Identity".into(),
            intro: "Describe your place in the tech world: how you see \
                    yourself and what you stand for."
                .into(),
            index: 0,
            questions: vec![
                Question {
                    id: "story".into(),
                    label: "Your story".into(),
                    hint: Some(
                        "Describe yourself in one sentence. Think of your \
                         passion and vision rather than your job title."
                            .into(),
                    ),
                    kind: text(10, 100),
                    options: Vec::new(),
                    allow_custom: false,
                    inspiration: strings(&[
                        "An analyst who makes sense of the world through data stories.",
                        "A security specialist building digital fortresses against cyber threats.",
                        "An engineer shaping the future with artificial intelligence.",
                        "A mobile enthusiast crafting user-centered applications.",
                        "A developer building projects that serve the community.",
                    ]),
                },
                Question {
                    id: "motivations".into(),
                    label: "Your motivations".into(),
                    hint: Some("Pick the main motivations that drive you.".into()),
                    kind: multi(3),
                    options: strings(&[
                        "Innovation and technology",
                        "Problem solving",
                        "User impact",
                        "Leadership and influence",
                        "Learning and growth",
                        "Financial success",
                        "Contributing to society",
                    ]),
                    allow_custom: true,
                    inspiration: Vec::new(),
                },
                Question {
                    id: "impact".into(),
                    label: "Your biggest impact area".into(),
                    hint: Some(
                        "Where do you most want your career to make a difference?".into(),
                    ),
                    kind: QuestionKind::SingleSelect,
                    options: strings(&[
                        "Product development",
                        "Data and analytics",
                        "Security and infrastructure",
                        "Design and experience",
                        "Strategy and management",
                        "Education and mentorship",
                        "Innovation and research",
                    ]),
                    allow_custom: false,
                    inspiration: Vec::new(),
                },
                Question {
                    id: "clarity".into(),
                    label: "Career identity clarity".into(),
                    hint: Some("How clear are your career goals right now?".into()),
                    kind: scale(),
                    options: Vec::new(),
                    allow_custom: false,
                    inspiration: Vec::new(),
                },
            ],
        },
        Section {
            id: "technical".into(),
            title: "Technical Profile".into(),
            intro: "Map out the skills you work with and the one you want \
                    to be known for."
                .into(),
            index: 1,
            questions: vec![
                Question {
                    id: "skills".into(),
                    label: "Technical skills".into(),
                    hint: Some("Select the technologies you actively use.".into()),
                    kind: multi(10),
                    options: strings(&[
                        "Python",
                        "JavaScript",
                        "Dart",
                        "Java",
                        "C++",
                        "Go",
                        "Rust",
                        "Flutter",
                        "React",
                        "Django",
                        "TensorFlow",
                        "Node.js",
                        "Firebase",
                        "MongoDB",
                        "SQL",
                        "PostgreSQL",
                        "Docker",
                        "Kubernetes",
                        "Figma",
                        "API development",
                        "CI/CD",
                        "Cloud computing",
                        "Cybersecurity",
                    ]),
                    allow_custom: true,
                    inspiration: Vec::new(),
                },
                Question {
                    id: "highlight_skill".into(),
                    label: "Highlight skill".into(),
                    hint: Some(
                        "The one ability you would put at the top of your profile.".into(),
                    ),
                    kind: text(10, 100),
                    options: Vec::new(),
                    allow_custom: false,
                    inspiration: strings(&[
                        "Data analysis with Python.",
                        "Dynamic web interfaces with React.",
                        "Cloud infrastructure on AWS.",
                        "Cross-platform mobile apps with Flutter.",
                    ]),
                },
                Question {
                    id: "learning_approach".into(),
                    label: "How you learn best".into(),
                    hint: None,
                    kind: QuestionKind::SingleSelect,
                    options: strings(&[
                        "Hands-on projects",
                        "Video courses",
                        "Documentation and articles",
                        "Mentorship and teamwork",
                        "Online communities",
                        "Structured courses",
                    ]),
                    allow_custom: false,
                    inspiration: Vec::new(),
                },
                Question {
                    id: "confidence".into(),
                    label: "Technical confidence".into(),
                    hint: Some("How confident do you feel in your technical skills?".into()),
                    kind: scale(),
                    options: Vec::new(),
                    allow_custom: false,
                    inspiration: Vec::new(),
                },
            ],
        },
        Section {
            id: "learning".into(),
            title: "Learning Style".into(),
            intro: "How you learn, where you learn, and what keeps you going.".into(),
            index: 2,
            questions: vec![
                Question {
                    id: "preference".into(),
                    label: "Preferred way of learning".into(),
                    hint: None,
                    kind: QuestionKind::SingleSelect,
                    options: strings(&[
                        "Videos and course platforms",
                        "Books and articles",
                        "Hands-on projects",
                        "Mentors and study groups",
                    ]),
                    allow_custom: true,
                    inspiration: Vec::new(),
                },
                Question {
                    id: "resources".into(),
                    label: "Learning resources".into(),
                    hint: Some("Where do you usually go to learn something new?".into()),
                    kind: multi(3),
                    options: strings(&[
                        "Online course platforms",
                        "YouTube videos",
                        "Open documentation and forums",
                        "Libraries and academic sources",
                    ]),
                    allow_custom: true,
                    inspiration: Vec::new(),
                },
                Question {
                    id: "motivation".into(),
                    label: "Learning motivation".into(),
                    hint: Some("What drives you to keep learning?".into()),
                    kind: text(10, 100),
                    options: Vec::new(),
                    allow_custom: false,
                    inspiration: strings(&[
                        "Gaining new skills to move my career forward.",
                        "Learning by building real projects.",
                        "Staying current with technology and following what is new.",
                        "Contributing to a community and sharing what I learn.",
                    ]),
                },
                Question {
                    id: "barriers".into(),
                    label: "Learning barriers".into(),
                    hint: Some("What most often gets in the way?".into()),
                    kind: text(10, 100),
                    options: Vec::new(),
                    allow_custom: false,
                    inspiration: strings(&[
                        "Time management.",
                        "Difficulty accessing good resources.",
                        "Lack of motivation.",
                        "Getting distracted easily.",
                    ]),
                },
            ],
        },
        Section {
            id: "career".into(),
            title: "Career Vision".into(),
            intro: "Where you are heading, near and far, and what matters \
                    most on the way."
                .into(),
            index: 3,
            questions: vec![
                Question {
                    id: "short_term_goal".into(),
                    label: "Short-term goal (1 year)".into(),
                    hint: Some("Who do you want to be a year from now?".into()),
                    kind: text(1, 200),
                    options: Vec::new(),
                    allow_custom: false,
                    inspiration: strings(&[
                        "A lead analyst on data analysis projects.",
                        "A developer contributing to an open source project.",
                        "A designer improving a product's user experience.",
                        "A developer with two published mobile apps.",
                    ]),
                },
                Question {
                    id: "long_term_goal".into(),
                    label: "Long-term goal (5 years)".into(),
                    hint: Some("Aim high; this is the direction, not a contract.".into()),
                    kind: text(1, 200),
                    options: Vec::new(),
                    allow_custom: false,
                    inspiration: strings(&[
                        "An engineer recognized globally for AI work.",
                        "A founder whose app reaches millions of users.",
                        "A security expert leading a team.",
                        "A technical lead at a technology startup.",
                    ]),
                },
                Question {
                    id: "priorities".into(),
                    label: "Career priorities".into(),
                    hint: Some("What matters most on the way there?".into()),
                    kind: multi(3),
                    options: strings(&[
                        "Skill development",
                        "Networking",
                        "Project experience",
                        "Leadership and management",
                        "Entrepreneurship",
                        "Certification and training",
                        "Work-life balance",
                    ]),
                    allow_custom: true,
                    inspiration: Vec::new(),
                },
                Question {
                    id: "progress".into(),
                    label: "Perceived progress".into(),
                    hint: Some("How far along do you feel you already are?".into()),
                    kind: scale(),
                    options: Vec::new(),
                    allow_custom: false,
                    inspiration: Vec::new(),
                },
            ],
        },
        Section {
            id: "projects".into(),
            title: "Project Experience".into(),
            intro: "What you have built, what you want to build next, and \
                    what stands in the way."
                .into(),
            index: 4,
            questions: vec![
                Question {
                    id: "past_projects".into(),
                    label: "Past projects".into(),
                    hint: Some("Describe a project you are proud of.".into()),
                    kind: text(1, 200),
                    options: Vec::new(),
                    allow_custom: false,
                    inspiration: strings(&[
                        "Built a machine learning model in Python.",
                        "Published a mobile application.",
                        "Worked on a web platform with React.",
                        "Contributed to an open source project.",
                    ]),
                },
                Question {
                    id: "technologies".into(),
                    label: "Technologies used".into(),
                    hint: Some("The stack behind your projects.".into()),
                    kind: multi(3),
                    options: strings(&[
                        "Flutter and Dart",
                        "Python",
                        "JavaScript and React",
                        "Java",
                        "SQL and NoSQL",
                    ]),
                    allow_custom: true,
                    inspiration: Vec::new(),
                },
                Question {
                    id: "future_project".into(),
                    label: "Next project".into(),
                    hint: Some("What would you like to build next?".into()),
                    kind: text(1, 200),
                    options: Vec::new(),
                    allow_custom: false,
                    inspiration: strings(&[
                        "Build and publish a mobile game.",
                        "Launch a web project.",
                        "Write software for an IoT device.",
                        "Complete a data analysis project.",
                    ]),
                },
                Question {
                    id: "challenges".into(),
                    label: "Project challenges".into(),
                    hint: Some("What makes finishing projects hard for you?".into()),
                    kind: text(1, 200),
                    options: Vec::new(),
                    allow_custom: false,
                    inspiration: strings(&[
                        "Time management.",
                        "Lack of resources.",
                        "Technical complexity.",
                        "Team coordination.",
                    ]),
                },
            ],
        },
        Section {
            id: "networking".into(),
            title: "Networking".into(),
            intro: "The people around your career: who you know, who you \
                    need, and what holds you back."
                .into(),
            index: 5,
            questions: vec![
                Question {
                    id: "mentorship_need".into(),
                    label: "Mentorship need".into(),
                    hint: Some("Where would a mentor help you most?".into()),
                    kind: QuestionKind::SingleSelect,
                    options: strings(&[
                        "Career planning",
                        "Technical knowledge",
                        "Communication skills",
                        "Leadership",
                    ]),
                    allow_custom: true,
                    inspiration: Vec::new(),
                },
                Question {
                    id: "current_connections".into(),
                    label: "Current connections".into(),
                    hint: Some("Who is already part of your professional circle?".into()),
                    kind: multi(5),
                    options: strings(&[
                        "Classmates and alumni",
                        "Colleagues",
                        "Online communities",
                        "Meetup and conference contacts",
                        "Mentors",
                    ]),
                    allow_custom: true,
                    inspiration: Vec::new(),
                },
                Question {
                    id: "networking_goal".into(),
                    label: "Networking goal".into(),
                    hint: Some("A concrete connection goal for the next months.".into()),
                    kind: text(10, 200),
                    options: Vec::new(),
                    allow_custom: false,
                    inspiration: strings(&[
                        "Connect with five developers in an open source project.",
                        "Make ten new contacts at a tech conference.",
                        "Add twenty professional connections on LinkedIn.",
                        "Take a leading role at a community event.",
                    ]),
                },
                Question {
                    id: "networking_challenges".into(),
                    label: "Networking challenges".into(),
                    hint: Some("What makes connecting with people hard?".into()),
                    kind: text(10, 200),
                    options: Vec::new(),
                    allow_custom: false,
                    inspiration: strings(&[
                        "Missing events because of a lack of time.",
                        "Shyness and difficulty approaching new people.",
                        "Language barriers or unfamiliar technical jargon.",
                        "Not using professional platforms effectively.",
                    ]),
                },
            ],
        },
        Section {
            id: "brand".into(),
            title: "Personal Brand".into(),
            intro: "How you show up in public: profiles, content, and the \
                    goal behind them."
                .into(),
            index: 6,
            questions: vec![
                Question {
                    id: "current_profiles".into(),
                    label: "Current profiles".into(),
                    hint: Some("Where can people find you today?".into()),
                    kind: multi(5),
                    options: strings(&[
                        "LinkedIn",
                        "GitHub",
                        "X (Twitter)",
                        "Medium",
                        "Personal website",
                        "YouTube",
                    ]),
                    allow_custom: true,
                    inspiration: Vec::new(),
                },
                Question {
                    id: "brand_goal".into(),
                    label: "Brand goal".into(),
                    hint: Some("What should your public presence achieve?".into()),
                    kind: text(10, 200),
                    options: Vec::new(),
                    allow_custom: false,
                    inspiration: strings(&[
                        "Share five open source projects on GitHub.",
                        "Grow an optimized LinkedIn profile to a thousand followers.",
                        "Publish my career story on a blog.",
                        "Speak at a community meetup.",
                    ]),
                },
                Question {
                    id: "content_types".into(),
                    label: "Content types".into(),
                    hint: Some("What kind of content would you produce?".into()),
                    kind: multi(5),
                    options: strings(&[
                        "Technical articles",
                        "Open source projects",
                        "Videos and tutorials",
                        "Talks and presentations",
                        "Short social posts",
                    ]),
                    allow_custom: true,
                    inspiration: Vec::new(),
                },
                Question {
                    id: "brand_challenges".into(),
                    label: "Brand challenges".into(),
                    hint: Some("What keeps you from building your brand?".into()),
                    kind: text(10, 200),
                    options: Vec::new(),
                    allow_custom: false,
                    inspiration: strings(&[
                        "Finding time to produce content regularly.",
                        "Struggling to come up with original ideas.",
                        "Hesitating to put myself out there.",
                        "Not understanding social platform algorithms.",
                    ]),
                },
            ],
        },
    ]
}
