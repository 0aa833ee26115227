#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;

pub struct InterviewCommand {
    command: String,
}

impl InterviewCommand {
    pub fn parse(text: &str) -> Option<InterviewCommand> {
        let prefix = text
            .trim()
            .split(' ')
            .map(|e| return e.to_string())
            .next()
            .unwrap_or_default();

        let cmd = InterviewCommand { command: prefix };
        if cmd.is_quit() || cmd.is_help() || cmd.is_topics() || cmd.is_retry() {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_topics(&self) -> bool {
        return ["/t", "/topics"].contains(&self.command.as_str());
    }

    pub fn is_retry(&self) -> bool {
        return ["/r", "/retry"].contains(&self.command.as_str());
    }
}
