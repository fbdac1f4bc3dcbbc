use crate::domain::RequestError;
use anyhow::anyhow;

/// Connectivity represents whether a faked API port can "reach" the server, and provides
/// common behavior for failing a call if the port is configured to be offline.
pub enum Connectivity {
    Connected,
    Disconnected,
}

impl Connectivity {
    /// Return a transport error if connectivity is in a "disconnected" state
    pub fn blow_up_if_disconnected(&self) -> Result<(), RequestError> {
        match self {
            Self::Connected => Ok(()),
            Self::Disconnected => Err(RequestError::Transport(anyhow!(
                "could not connect to the task API!"
            ))),
        }
    }
}

/// FakeImplementation stands in for a single port function: it captures the arguments
/// of every call and hands back a preconfigured result. Native async trait functions
/// don't play well with mocking libraries, so API ports are faked with this instead.
///
/// * [Args] represents the arguments passed to the function that should be captured on a call
/// * [Ret] represents the type of the function's return value
///
/// # Example
///
/// ```ignore
/// struct FakeAuthApi {
///     login_result: FakeImplementation<Credential, Result<(), RequestError>>,
/// }
///
/// impl AuthApi for Mutex<FakeAuthApi> {
///     async fn login(&self, credential: &Credential, ..) -> Result<(), RequestError> {
///         let mut locked_self = self.lock().unwrap();
///         locked_self.login_result.save_arguments(credential.clone());
///         locked_self.login_result.return_value_result()
///     }
/// }
/// ```
pub struct FakeImplementation<Args, Ret> {
    saved_arguments: Vec<Args>,
    return_value: Option<Ret>,
}

impl<Args, Ret> FakeImplementation<Args, Ret> {
    /// Creates a new FakeImplementation
    pub fn new() -> FakeImplementation<Args, Ret> {
        FakeImplementation {
            saved_arguments: Vec::new(),
            return_value: None,
        }
    }

    /// Saves arguments from a single invocation of the FakeImplementation
    pub fn save_arguments(&mut self, arguments: Args) {
        self.saved_arguments.push(arguments)
    }

    /// Returns the list of arguments passed on every call to this FakeImplementation
    pub fn calls(&self) -> &[Args] {
        self.saved_arguments.as_slice()
    }
}

impl<Args, Success, Fail> FakeImplementation<Args, Result<Success, Fail>>
where
    Success: Clone,
    Fail: Clone,
{
    /// Set the result that should be returned when this FakeImplementation is invoked
    pub fn set_returned_result(&mut self, return_value: Result<Success, Fail>) {
        self.return_value = Some(return_value)
    }

    /// Retrieve the result that should be returned when this FakeImplementation is invoked
    pub fn return_value_result(&self) -> Result<Success, Fail> {
        match self.return_value {
            Some(Ok(ref ok_result)) => Ok(ok_result.clone()),
            Some(Err(ref err)) => Err(err.clone()),
            None => panic!("Tried to return from a function where the return value wasn't set!"),
        }
    }
}
