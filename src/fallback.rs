//! Built-in course catalogue used when the backend cannot be reached.

use crate::model::Course;

fn course(id: &str, code: &str, name: &str, topics: &[&str], prerequisites: &[&str]) -> Course {
	Course {
		id: id.into(),
		code: code.into(),
		name: name.into(),
		description: None,
		topics: topics.iter().map(|t| t.to_string()).collect(),
		prerequisites: prerequisites.iter().map(|p| p.to_string()).collect(),
		color: None,
	}
}

/// The static catalogue. Only shown after a failed course fetch.
pub fn fallback_courses() -> Vec<Course> {
	vec![
		course(
			"213",
			"15-213",
			"Introduction to Computer Systems",
			&["Cache", "Memory", "Assembly", "C Programming", "Virtual Memory"],
			&["15-122"],
		),
		course(
			"122",
			"15-122",
			"Principles of Imperative Computation",
			&["C0", "Data Structures", "Algorithms"],
			&[],
		),
		course(
			"251",
			"15-251",
			"Great Theoretical Ideas in Computer Science",
			&["Graph Theory", "Probability", "Complexity"],
			&[],
		),
		course(
			"210",
			"15-210",
			"Principles of Programming",
			&["Parallel Algorithms", "Functional Programming"],
			&["15-122"],
		),
	]
}
