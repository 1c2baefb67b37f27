use sureddo_client::api::{Error, Time};

pub fn format_time(t: Time) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

/// Reads a picked file into memory so it can be shipped to media storage
pub async fn read_file(file: &web_sys::File) -> Result<Vec<u8>, Error> {
    let buf = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| Error::Insert(String::from("failed reading the selected file")))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}
