// ============================================================================
// RESOURCE STATE - data / loading / error tri-state of one fetch resource
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> ResourceState<T> {
    /// Start of a request: previous data and error are dropped
    pub fn begin(&mut self) {
        self.data = None;
        self.error = None;
        self.loading = true;
    }

    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.error = None;
        self.loading = false;
    }

    pub fn fail(&mut self, message: String) {
        self.data = None;
        self.error = Some(message);
        self.loading = false;
    }

    /// Not loading and exactly one of data / error is set
    pub fn is_settled(&self) -> bool {
        !self.loading && (self.data.is_some() != self.error.is_some())
    }

    pub fn is_idle(&self) -> bool {
        !self.loading && self.data.is_none() && self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_keep_data_and_error_exclusive() {
        let mut state: ResourceState<u32> = ResourceState::default();
        assert!(state.is_idle());

        state.begin();
        assert!(state.loading && !state.is_settled());

        state.succeed(3);
        assert!(state.is_settled());
        assert_eq!(state.error, None);

        state.begin();
        assert_eq!(state.data, None);
        state.fail("Network Error".to_string());
        assert!(state.is_settled());
        assert_eq!(state.data, None);
    }
}
