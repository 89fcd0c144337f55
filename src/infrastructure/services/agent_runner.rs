//! Bounded think/act agent loop
//!
//! Drives the text protocol used on a cache miss: the LLM alternates
//! Thought/Action/Action Input steps with tool observations until it emits a
//! final answer or the loop cap is reached. Terminal failures come back as
//! explicit "Error:" answers so the caller can decide not to cache them.

use std::sync::Arc;

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::domain::llm::LlmProvider;
use crate::domain::tool::{InvocationRecord, Tool};

const OBSERVATION_TOKEN: &str = "Observation:";
const FINAL_ANSWER_TOOL: &str = "Final Answer";
const DEFAULT_MAX_LOOPS: usize = 15;

static THOUGHT_ACTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)Thought:\s*(.*?)\nAction:\s*(.*?)\nAction Input:\s*(.*?)(?:\n|$)")
        .expect("invalid thought/action regex")
});
static FINAL_ANSWER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)Final Answer:\s*(.*)").expect("invalid final answer regex"));

/// Runner for the bounded think/act loop
#[derive(Debug)]
pub struct AgentRunner {
    llm_provider: Arc<dyn LlmProvider>,
    tools: Vec<Arc<dyn Tool>>,
    max_loops: usize,
}

impl AgentRunner {
    /// Create a new runner over the given tools
    pub fn new(llm_provider: Arc<dyn LlmProvider>, tools: Vec<Arc<dyn Tool>>) -> Self {
        Self {
            llm_provider,
            tools,
            max_loops: DEFAULT_MAX_LOOPS,
        }
    }

    /// Override the loop cap
    pub fn with_max_loops(mut self, max_loops: usize) -> Self {
        self.max_loops = max_loops.max(1);
        self
    }

    /// The tools available to the loop
    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    fn tools_description(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("{}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn tool_names(&self) -> String {
        self.tools
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn find_tool(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    fn build_prompt(&self, question: &str) -> String {
        format!(
            "Today is {today}.\n\
             You are an AI assistant that can use tools to answer questions.\n\
             Your goal is to answer the user's question: {question}\n\
             \n\
             You have access to the following tools:\n\
             {tools_description}\n\
             \n\
             To use a tool, you MUST use the following format:\n\
             Thought: Your reasoning for the next action.\n\
             Action: The name of the tool to use, MUST be one of [{tool_names}].\n\
             Action Input: The input string for the chosen tool.\n\
             \n\
             After an action, you will receive an observation.\n\
             Observation: The result from the tool.\n\
             \n\
             Repeat the Thought, Action, Action Input, Observation cycle until you have \
             enough information to answer the user's question.\n\
             When you have the final answer, use this format:\n\
             Thought: I now have the final answer.\n\
             Final Answer: The final answer to the user's question.\n\
             \n\
             Let's begin!\n\
             \n\
             User's question: {question}\n",
            today = Utc::now().format("%Y-%m-%d"),
            question = question,
            tools_description = self.tools_description(),
            tool_names = self.tool_names(),
        )
    }

    /// Run the loop for one question
    ///
    /// Returns the final answer and the history of tool interactions; never
    /// fails, error conditions become terminal "Error:" answers.
    pub async fn run(&self, question: &str) -> (String, Vec<InvocationRecord>) {
        let mut prompt = self.build_prompt(question);
        let mut history = Vec::new();
        let stop = vec![format!("\n{}", OBSERVATION_TOKEN)];

        for _ in 0..self.max_loops {
            let output = match self.llm_provider.generate(&prompt, &stop).await {
                Ok(output) => output,
                Err(e) => {
                    warn!("LLM generation failed in agent loop: {}", e);
                    return (
                        "Error: The language model failed to respond.".to_string(),
                        history,
                    );
                }
            };

            let Some(captures) = THOUGHT_ACTION_RE.captures(&output) else {
                // No action step: either a direct final answer or a format break
                if let Some(answer) = FINAL_ANSWER_RE.captures(&output) {
                    return (answer[1].trim().to_string(), history);
                }

                warn!("Agent output did not follow the expected format");
                return (
                    "Error: LLM output did not follow the expected format.".to_string(),
                    history,
                );
            };

            let thought = captures[1].trim().to_string();
            let action = captures[2].trim().to_string();
            let action_input = captures[3].trim().trim_matches('"').to_string();

            debug!("Agent step: action '{}', input '{}'", action, action_input);

            if action == FINAL_ANSWER_TOOL {
                let answer = if action_input.is_empty() {
                    thought
                } else {
                    action_input
                };
                return (answer, history);
            }

            let observation = match self.find_tool(&action) {
                Some(tool) => tool.invoke(&action_input).await,
                None => format!(
                    "Error: Tool '{}' not found. Available tools: {}",
                    action,
                    self.tool_names()
                ),
            };

            history.push(InvocationRecord::ToolInvocation {
                tool_name: action,
                tool_input: action_input,
                observation: observation.clone(),
                similarity: 1.0,
            });

            prompt.push_str(&format!(
                "\n{}\n{} {}\n",
                output.trim(),
                OBSERVATION_TOKEN,
                observation.trim()
            ));
        }

        (
            "Error: Agent reached maximum loops without a final answer.".to_string(),
            history,
        )
    }
}
