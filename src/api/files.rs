use crate::client::{endpoints, ApiClient};
use crate::errors::Error;
use crate::model::{FileRecord, UploadProgress};

use log::*;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

const MULTIPART_BOUNDARY: &'static str = "----tracepcap-upload-4f9a2c";

/// Counts bytes as the transport drains the body, reporting (sent, total) to
/// the progress callback. Fire and forget, callback errors cannot exist.
pub struct ProgressReader<R, F> {
    inner: R,
    sent: u64,
    total: u64,
    on_progress: F,
}

impl<R: Read, F: FnMut(u64, u64)> ProgressReader<R, F> {
    pub fn new(inner: R, total: u64, on_progress: F) -> Self {
        ProgressReader {
            inner,
            sent: 0,
            total,
            on_progress,
        }
    }
}

impl<R: Read, F: FnMut(u64, u64)> Read for ProgressReader<R, F> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let read = self.inner.read(buf)?;
        if read > 0 {
            self.sent += read as u64;
            (self.on_progress)(self.sent, self.total);
        }
        Ok(read)
    }
}

impl ApiClient {
    /// Upload a capture as multipart/form-data. The callback observes raw
    /// bytes on the wire including the multipart framing, so it reaches
    /// (total, total) exactly when the body is fully sent.
    pub fn upload_capture<P, F>(&self, capture: P, on_progress: F) -> Result<FileRecord, Error>
    where
        P: AsRef<Path>,
        F: FnMut(u64, u64),
    {
        let capture = capture.as_ref();
        let file_name = capture
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("capture.pcap");
        let file = File::open(capture)?;
        let file_len = file.metadata()?.len();

        let head = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            boundary = MULTIPART_BOUNDARY,
            name = file_name,
        )
        .into_bytes();
        let tail = format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).into_bytes();
        let total = head.len() as u64 + file_len + tail.len() as u64;

        let body = Cursor::new(head).chain(file).chain(Cursor::new(tail));
        let body = ProgressReader::new(body, total, on_progress);

        info!("Uploading {} ({} bytes) to {}", file_name, file_len, endpoints::FILES);
        let response = self
            .request("POST", endpoints::FILES)
            .set(
                "Content-Type",
                &format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
            )
            .set("Content-Length", &total.to_string())
            .send(body)
            .map_err(|e| self.fail(endpoints::FILES, e))?;

        response.into_json().map_err(Error::Io)
    }

    pub fn list_files(&self) -> Result<Vec<FileRecord>, Error> {
        self.get_json(endpoints::FILES, &[])
    }

    pub fn file_metadata(&self, file_id: &str) -> Result<FileRecord, Error> {
        self.get_json(&endpoints::file_metadata(file_id), &[])
    }

    /// Coarse progress for a file the backend is still working on.
    pub fn upload_status(&self, file_id: &str) -> Result<UploadProgress, Error> {
        Ok(self.file_metadata(file_id)?.progress())
    }

    /// Remove a capture and everything derived from it server side.
    pub fn delete_file(&self, file_id: &str) -> Result<(), Error> {
        let path = endpoints::file_metadata(file_id);
        self.request("DELETE", &path)
            .call()
            .map_err(|e| self.fail(&path, e))?;
        info!("Deleted capture {}", file_id);
        Ok(())
    }
}
