/// Subject areas recognised from a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Cpu,
    Networking,
    Database,
    Programming,
    Mathematics,
    Physics,
    Chemistry,
    Biology,
    History,
    Literature,
    General,
}

/// Checked in order; the first topic with a matching fragment wins.
const RULES: [(Topic, &[&str]); 10] = [
    (Topic::Cpu, &["cpu", "processor"]),
    (Topic::Networking, &["network", "internet"]),
    (Topic::Database, &["database", "sql"]),
    (Topic::Programming, &["programming", "code"]),
    (Topic::Mathematics, &["math", "calculus"]),
    (Topic::Physics, &["physics"]),
    (Topic::Chemistry, &["chemistry"]),
    (Topic::Biology, &["biology"]),
    (Topic::History, &["history"]),
    (Topic::Literature, &["literature", "english"]),
];

impl Topic {
    pub fn classify(file_name: &str) -> Self {
        let name = file_name.to_lowercase();
        RULES
            .iter()
            .find(|(_, fragments)| fragments.iter().any(|f| name.contains(f)))
            .map(|(topic, _)| *topic)
            .unwrap_or(Topic::General)
    }

    pub fn labels(self) -> [&'static str; 4] {
        match self {
            Topic::Cpu => ["CPU", "processor", "computer architecture", "central processing unit"],
            Topic::Networking => ["networking", "internet", "protocols", "TCP/IP"],
            Topic::Database => ["database", "SQL", "data management", "DBMS"],
            Topic::Programming => ["programming", "coding", "algorithms", "software development"],
            Topic::Mathematics => ["mathematics", "calculus", "algebra", "equations"],
            Topic::Physics => ["physics", "mechanics", "thermodynamics", "electricity"],
            Topic::Chemistry => ["chemistry", "molecules", "reactions", "periodic table"],
            Topic::Biology => ["biology", "cells", "organisms", "genetics"],
            Topic::History => ["history", "events", "civilization", "culture"],
            Topic::Literature => ["literature", "poetry", "novels", "writing"],
            Topic::General => [
                "general knowledge",
                "academic concepts",
                "study material",
                "education",
            ],
        }
    }

    /// Hand-written vocabulary. Only CPU and networking have any; other
    /// topics fall back to whatever keywords the document yields.
    pub fn authored(self) -> Option<AuthoredContent> {
        match self {
            Topic::Cpu => Some(AuthoredContent {
                key_terms: &[
                    "CPU",
                    "ALU",
                    "Control Unit",
                    "Cache",
                    "Register",
                    "Clock Speed",
                    "Core",
                    "Pipeline",
                ],
                concepts: &[
                    "The CPU is the brain of the computer that executes instructions",
                    "ALU performs arithmetic and logical operations",
                    "Control Unit manages the execution of instructions",
                    "Cache memory provides fast access to frequently used data",
                    "Multiple cores allow parallel processing",
                ],
                facts: &[
                    "Modern CPUs can execute billions of instructions per second",
                    "The first microprocessor was the Intel 4004 in 1971",
                    "CPU performance is measured in GHz (gigahertz)",
                ],
            }),
            Topic::Networking => Some(AuthoredContent {
                key_terms: &[
                    "TCP/IP",
                    "HTTP",
                    "Router",
                    "Switch",
                    "Protocol",
                    "Bandwidth",
                    "Latency",
                    "Firewall",
                ],
                concepts: &[
                    "Networks allow computers to communicate and share resources",
                    "TCP/IP is the fundamental protocol suite for internet communication",
                    "Routers direct data packets between different networks",
                    "Bandwidth determines the maximum data transfer rate",
                ],
                facts: &[
                    "The internet connects billions of devices worldwide",
                    "HTTP is the protocol used for web browsing",
                    "Network security is crucial for protecting data",
                ],
            }),
            _ => None,
        }
    }
}

pub struct AuthoredContent {
    pub key_terms: &'static [&'static str],
    pub concepts: &'static [&'static str],
    pub facts: &'static [&'static str],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        // "cpu" outranks "network"
        assert_eq!(Topic::classify("CPU_and_Network.pdf"), Topic::Cpu);
        assert_eq!(Topic::classify("Intro-To-SQL.pptx"), Topic::Database);
        assert_eq!(Topic::classify("english101.docx"), Topic::Literature);
        assert_eq!(Topic::classify("lecture.pdf"), Topic::General);
    }

    #[test]
    fn test_only_two_topics_are_authored() {
        assert!(Topic::Cpu.authored().is_some());
        assert!(Topic::Networking.authored().is_some());
        assert!(Topic::Biology.authored().is_none());
    }
}
