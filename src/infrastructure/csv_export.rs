use crate::domain::Dish;
use std::path::Path;

pub struct CsvExporter;

impl CsvExporter {
    /// Writes the menu to `filename` as CSV with a header row.
    ///
    /// Returns the filename on success so the caller can report it.
    pub fn export_menu(dishes: &[Dish], filename: &str) -> Result<String, String> {
        let mut writer = csv::Writer::from_path(Path::new(filename)).map_err(|e| e.to_string())?;
        Self::write_rows(&mut writer, dishes)?;
        writer.flush().map_err(|e| e.to_string())?;
        Ok(filename.to_string())
    }

    fn write_rows<W: std::io::Write>(writer: &mut csv::Writer<W>, dishes: &[Dish]) -> Result<(), String> {
        writer
            .write_record(["name", "description", "course", "price", "image_uri"])
            .map_err(|e| e.to_string())?;

        for dish in dishes {
            let price = format!("{:.2}", dish.price);
            writer
                .write_record([
                    dish.name.as_str(),
                    dish.description.as_str(),
                    dish.course.map(|c| c.label()).unwrap_or(""),
                    price.as_str(),
                    dish.image_uri.as_deref().unwrap_or(""),
                ])
                .map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}
