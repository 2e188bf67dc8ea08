//! Quests and quiz questions authored in the DSL.

use dungeon_foundation::{Error, Graph, HostObject, Result};
use dungeon_semantic::{DslType, InstanceArgs, Shape, TypeDescriptor};

/// A quiz question with exactly one correct answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleChoiceQuestion {
    description: String,
    answers: Vec<String>,
    correct_answer: usize,
}

impl SingleChoiceQuestion {
    /// Creates a question.
    ///
    /// # Errors
    ///
    /// Returns an error if `correct_answer` does not index into `answers`.
    pub fn new(description: impl Into<String>, answers: Vec<String>, correct_answer: i64) -> Result<Self> {
        let index = usize::try_from(correct_answer)
            .ok()
            .filter(|i| *i < answers.len())
            .ok_or_else(|| {
                Error::type_mismatch(
                    format!("answer index below {}", answers.len()),
                    correct_answer.to_string(),
                )
            })?;
        Ok(Self {
            description: description.into(),
            answers,
            correct_answer: index,
        })
    }

    fn from_args(args: &InstanceArgs) -> Result<HostObject> {
        Self::new(
            args.string("description")?,
            args.strings("answers")?,
            args.int("correct_answer")?,
        )
        .map(HostObject::new)
    }

    /// The question text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The offered answers.
    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Returns true if `choice` is the correct answer's index.
    #[must_use]
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_answer
    }
}

impl DslType for SingleChoiceQuestion {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::record::<SingleChoiceQuestion>()
            .member("description", Shape::String)
            .member("answers", Shape::list(Shape::String))
            .member("correctAnswer", Shape::Int)
            .constructor(Self::from_args)
    }
}

/// A quest: tasks ordered by a dependency graph, a reward, and quiz questions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quest {
    name: String,
    tasks: Graph,
    reward: i64,
    questions: Vec<SingleChoiceQuestion>,
}

impl Quest {
    fn from_args(args: &InstanceArgs) -> Result<HostObject> {
        let tasks = if args.contains("tasks") {
            args.graph("tasks")?.clone()
        } else {
            Graph::new()
        };
        let questions = if args.contains("questions") {
            args.objects::<SingleChoiceQuestion>("questions")?
        } else {
            Vec::new()
        };
        Ok(HostObject::new(Self {
            name: args.string("name")?.to_string(),
            tasks,
            reward: args.int_or("reward", 0)?,
            questions,
        }))
    }

    /// The quest title.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tasks and their ordering.
    #[must_use]
    pub fn tasks(&self) -> &Graph {
        &self.tasks
    }

    /// Tasks unlocked by finishing `task`.
    #[must_use]
    pub fn next_tasks(&self, task: &str) -> Vec<&str> {
        self.tasks.successors(task)
    }

    /// Experience granted on completion.
    #[must_use]
    pub fn reward(&self) -> i64 {
        self.reward
    }

    /// Quiz questions asked along the way.
    #[must_use]
    pub fn questions(&self) -> &[SingleChoiceQuestion] {
        &self.questions
    }
}

impl DslType for Quest {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::class::<Quest>()
            .member("name", Shape::String)
            .member("tasks", Shape::graph(Shape::String))
            .member("reward", Shape::Int)
            .member("questions", Shape::list(Shape::host::<SingleChoiceQuestion>()))
            .constructor(Self::from_args)
    }
}
