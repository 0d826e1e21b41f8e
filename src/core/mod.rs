pub mod form_state;
pub mod geolocation;
pub mod multi_select;
pub mod schema;
pub mod submission;
pub mod tri_state;
pub mod value;

pub use form_state::{ChangePayload, FieldChange, FormState};
pub use geolocation::{Coordinates, GeolocationError, GeolocationProvider, LocationCapture};
pub use schema::{FieldKind, FieldSpec, FormSchema};
pub use submission::{
    FormKind, NoticeStyle, SubmissionController, SubmissionOutcome, SubmissionPhase,
    SubmitProfile,
};
pub use value::Value;
