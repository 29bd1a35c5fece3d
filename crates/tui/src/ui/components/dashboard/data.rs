//! Static sample data rendered by the dashboard panels.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn is_at_risk(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Class,
    Webinar,
    Exam,
}

impl SessionKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Webinar => "webinar",
            Self::Exam => "exam",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Stat {
    pub title: &'static str,
    pub value: String,
    /// Positive trend in percent, when the card shows one.
    pub trend: Option<u8>,
}

#[derive(Debug, Clone)]
pub struct Alert {
    pub severity: Severity,
    pub message: &'static str,
    pub age: &'static str,
}

#[derive(Debug, Clone)]
pub struct Learner {
    pub name: &'static str,
    pub email: &'static str,
    pub progress: u8,
    pub engagement: u8,
    pub risk: RiskLevel,
    pub voucher_redeemed: Option<bool>,
    pub last_active: &'static str,
}

#[derive(Debug, Clone)]
pub struct Deadline {
    pub title: &'static str,
    pub due_in_days: u16,
}

impl Deadline {
    pub fn is_urgent(&self) -> bool {
        self.due_in_days <= 3
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub start: &'static str,
    pub end: &'static str,
    pub title: &'static str,
    pub trainer: &'static str,
    pub kind: SessionKind,
}

#[derive(Debug, Clone)]
pub struct Batch {
    pub name: &'static str,
    pub learners: u16,
    pub completion: u8,
    pub engagement: u8,
}

#[derive(Debug, Clone)]
pub struct Insight {
    pub headline: &'static str,
    pub action: &'static str,
}

#[derive(Debug, Clone)]
pub struct Contact {
    pub role: &'static str,
    pub name: &'static str,
    pub reach: &'static str,
}

#[derive(Debug, Clone)]
pub struct DashboardData {
    pub quick_actions: Vec<&'static str>,
    pub stats: Vec<Stat>,
    pub alerts: Vec<Alert>,
    pub learners: Vec<Learner>,
    pub deadlines: Vec<Deadline>,
    pub sessions: Vec<Session>,
    pub batches: Vec<Batch>,
    pub insights: Vec<Insight>,
    pub contacts: Vec<Contact>,
}

impl Default for DashboardData {
    fn default() -> Self {
        Self::sample()
    }
}

impl DashboardData {
    pub fn at_risk_learners(&self) -> impl Iterator<Item = &Learner> {
        self.learners.iter().filter(|learner| learner.risk.is_at_risk())
    }

    pub fn average_engagement(&self) -> u8 {
        if self.learners.is_empty() {
            return 0;
        }
        let total: u32 = self.learners.iter().map(|learner| u32::from(learner.engagement)).sum();
        (total as f64 / self.learners.len() as f64).round() as u8
    }

    pub fn sample() -> Self {
        let learners = vec![
            learner("Priya Sharma", "priya.sharma@contoso.com", 92, 88, RiskLevel::Low, Some(true), "today"),
            learner("Marcus Chen", "marcus.chen@contoso.com", 34, 41, RiskLevel::High, Some(false), "6 days ago"),
            learner("Aisha Okafor", "aisha.okafor@contoso.com", 76, 79, RiskLevel::Low, Some(true), "yesterday"),
            learner("Daniel Ruiz", "daniel.ruiz@contoso.com", 12, 18, RiskLevel::Critical, None, "14 days ago"),
            learner("Hannah Weber", "hannah.weber@contoso.com", 58, 63, RiskLevel::Medium, Some(false), "2 days ago"),
            learner("Kenji Watanabe", "kenji.watanabe@contoso.com", 100, 95, RiskLevel::Low, Some(true), "today"),
            learner("Sofia Rossi", "sofia.rossi@contoso.com", 27, 35, RiskLevel::High, Some(false), "9 days ago"),
            learner("Omar Haddad", "omar.haddad@contoso.com", 68, 71, RiskLevel::Medium, Some(true), "3 days ago"),
        ];
        let mut data = Self {
            quick_actions: vec!["Send Bulk Message", "Schedule Session", "View Reports", "Export Data"],
            stats: Vec::new(),
            alerts: vec![
                Alert {
                    severity: Severity::Critical,
                    message: "Daniel Ruiz has been inactive for 14 days",
                    age: "1h",
                },
                Alert {
                    severity: Severity::Warning,
                    message: "AZ-104 exam vouchers expire in 3 days",
                    age: "3h",
                },
                Alert {
                    severity: Severity::Warning,
                    message: "Batch B-07 completion dropped below 50%",
                    age: "5h",
                },
                Alert {
                    severity: Severity::Info,
                    message: "2 new support tickets awaiting response",
                    age: "1d",
                },
            ],
            deadlines: vec![
                Deadline {
                    title: "AZ-900 certification exam",
                    due_in_days: 2,
                },
                Deadline {
                    title: "Voucher redemption window closes",
                    due_in_days: 3,
                },
                Deadline {
                    title: "Module 4 assessment",
                    due_in_days: 7,
                },
                Deadline {
                    title: "Quarterly progress report",
                    due_in_days: 12,
                },
            ],
            sessions: vec![
                Session {
                    start: "09:00",
                    end: "10:30",
                    title: "Azure Fundamentals: Networking",
                    trainer: "Elena Petrova",
                    kind: SessionKind::Class,
                },
                Session {
                    start: "12:00",
                    end: "13:00",
                    title: "Exam readiness webinar",
                    trainer: "James Miller",
                    kind: SessionKind::Webinar,
                },
                Session {
                    start: "15:00",
                    end: "17:00",
                    title: "AZ-104 practice exam",
                    trainer: "Elena Petrova",
                    kind: SessionKind::Exam,
                },
            ],
            batches: vec![
                Batch {
                    name: "B-05 Azure Fundamentals",
                    learners: 32,
                    completion: 81,
                    engagement: 86,
                },
                Batch {
                    name: "B-06 Azure Administrator",
                    learners: 28,
                    completion: 64,
                    engagement: 70,
                },
                Batch {
                    name: "B-07 Data Engineering",
                    learners: 24,
                    completion: 46,
                    engagement: 52,
                },
            ],
            insights: vec![
                Insight {
                    headline: "3 learners stalled on Module 3 quizzes",
                    action: "Share the Module 3 review pack",
                },
                Insight {
                    headline: "Webinar attendees finish 22% faster",
                    action: "Invite at-risk learners to Thursday's webinar",
                },
                Insight {
                    headline: "Marcus Chen responds best to morning nudges",
                    action: "Schedule a check-in before 10:00",
                },
                Insight {
                    headline: "Voucher redemption lags in batch B-06",
                    action: "Send a redemption reminder",
                },
            ],
            contacts: vec![
                Contact {
                    role: "Customer Success Manager",
                    name: "Rachel Green",
                    reach: "+1 555 0142 · rachel.green@learnova.io",
                },
                Contact {
                    role: "Support Desk",
                    name: "Learnova Support",
                    reach: "support@learnova.io",
                },
                Contact {
                    role: "Lead Trainer",
                    name: "Elena Petrova",
                    reach: "elena.petrova@learnova.io",
                },
            ],
            learners,
        };
        let at_risk = data.at_risk_learners().count();
        let engagement = data.average_engagement();
        data.stats = vec![
            stat("Total Learners", "248", Some(12)),
            stat("Active Courses", "6", None),
            stat("Avg Completion", "67%", Some(5)),
            stat("Vouchers Redeemed", "143", None),
            stat("Upcoming Classes", "9", None),
            stat("At-Risk Learners", &at_risk.to_string(), None),
            stat("Active Alerts", &data.alerts.len().to_string(), None),
            stat("Avg Engagement", &format!("{engagement}%"), Some(8)),
        ];
        data
    }
}

fn learner(
    name: &'static str,
    email: &'static str,
    progress: u8,
    engagement: u8,
    risk: RiskLevel,
    voucher_redeemed: Option<bool>,
    last_active: &'static str,
) -> Learner {
    Learner {
        name,
        email,
        progress,
        engagement,
        risk,
        voucher_redeemed,
        last_active,
    }
}

fn stat(title: &'static str, value: &str, trend: Option<u8>) -> Stat {
    Stat {
        title,
        value: value.to_string(),
        trend,
    }
}
