mod bridge;
mod codec;
mod model;

pub use bridge::{apply_save_data, save_data_from_session};
pub use codec::{SaveFormat, read_save, write_save};
pub use model::{SAVE_VERSION, SaveData};
