/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
use crate::error::DataFormatError;
use crate::Float;

use super::weather::EPWWeather;
use super::weather_line::EPWWeatherLine;
use std::path::Path;

/// Minimum number of fields in a data line (up to the precipitable water)
const MIN_DATA_FIELDS: usize = 29;

/// Marks missing wind directions
const MISSING_WIND_DIRECTION: Float = 999.;

pub(crate) struct EPWScanner<'a> {
    /// Indicates the position of current character being
    /// scanned
    current: usize,

    /// Indicates the position of the first character of the
    /// element being scanned
    start: usize,

    /// Indicates the line of the EPW file in which we are
    line: usize,

    /// The data source
    src: &'a [u8],

    /// Are we in a string? (i.e. within quotation marks, e.g. " STRING ")
    in_string: bool,

    /// The file being scanned, for reporting errors
    path: &'a Path,
}

impl<'a> EPWScanner<'a> {
    /// Creates a new scanner.
    pub fn new(src: &'a [u8], path: &'a Path) -> Self {
        Self {
            current: 0,
            start: 0,
            line: 1,
            src,
            in_string: false,
            path,
        }
    }

    /// Parses the EPW file and builds a proper EPWWeather
    pub fn build_weather_file(src: &'a [u8], path: &'a Path) -> Result<EPWWeather, DataFormatError> {
        let mut scanner = EPWScanner::new(src, path);
        let mut epw = EPWWeather::default();
        scanner.parse_file(&mut epw)?;

        Ok(epw)
    }

    fn error(&self, reason: String) -> DataFormatError {
        DataFormatError::Epw {
            path: self.path.to_path_buf(),
            line: self.line,
            reason,
        }
    }

    /// Checks if the scanner is finished
    fn is_finished(&self) -> bool {
        self.current >= self.src.len()
    }

    /// Scans all the characters until reaching the Comma or the end of the line.
    /// Returns a slice
    fn scan_element(&mut self) -> Option<&'a [u8]> {
        if self.is_finished() {
            return None;
        }

        loop {
            // Return if scanning is over
            if self.is_finished() {
                break;
            }

            // If we find a comma, and we are not in a string, break
            if !self.in_string && self.src[self.current] == b',' {
                break;
            }

            // Increase line number if required
            if self.src[self.current] == b'\n' {
                self.line += 1;
                break;
            }

            // Toggle string if we are in one.
            if self.src[self.current] == b'"' {
                self.in_string = !self.in_string;
            }
            self.current += 1;
        }

        // Ignore the \r thing that I hate
        let mut end = self.current.min(self.src.len());
        if end > self.start && self.src[end - 1] == b'\r' {
            end -= 1;
        }
        let (ini, fin) = (self.start, end);

        self.current += 1; // skip the comma
        self.start = self.current;

        self.src.get(ini..fin)
    }

    /// Scans the elements until the end of the current line
    fn scan_line(&mut self) -> Vec<&'a [u8]> {
        let mut ret = Vec::with_capacity(35);
        let line = self.line;
        while let Some(e) = self.scan_element() {
            ret.push(e);
            if self.line != line {
                break;
            }
        }
        ret
    }

    fn to_string(&self, slice: Option<&[u8]>) -> Result<String, DataFormatError> {
        match slice {
            Some(v) => String::from_utf8(v.to_vec()).map_err(|e| self.error(e.to_string())),
            None => Err(self.error("unexpected end of file".to_string())),
        }
    }

    fn to_number(&self, slice: Option<&[u8]>) -> Result<Float, DataFormatError> {
        let v = self.to_string(slice)?;
        v.trim()
            .parse::<Float>()
            .map_err(|_| self.error(format!("'{}' is not a number", v)))
    }

    /// Scans the next element as a String
    fn next_string(&mut self) -> Result<String, DataFormatError> {
        let e = self.scan_element();
        self.to_string(e)
    }

    /// Scans the next element as a number
    fn next_number(&mut self) -> Result<Float, DataFormatError> {
        let e = self.scan_element();
        self.to_number(e)
    }

    /// Goes through the file looking for the parts we need (the
    /// location and the data). Everything else is skipped.
    fn parse_file(&mut self, epw: &mut EPWWeather) -> Result<(), DataFormatError> {
        let mut found_location = false;
        loop {
            // Scan
            let slice_option = self.scan_element();

            // Break if we are finished
            if slice_option.is_none() {
                break;
            }
            let keyword = self.to_string(slice_option)?;

            // Parse location, when found
            if keyword == *"LOCATION" {
                self.parse_location(epw)?;
                found_location = true;
            }

            if keyword == *"DATA PERIODS" {
                self.parse_data_periods(epw)?;
            }
        }

        if !found_location {
            return Err(self.error("no LOCATION found".to_string()));
        }

        Ok(())
    }

    /// Parse the actual data, starting from the description of the
    /// data period.
    /// For now, this only allows a single data period
    fn parse_data_periods(&mut self, epw: &mut EPWWeather) -> Result<(), DataFormatError> {
        let n = self.next_number()? as usize;
        if n != 1 {
            return Err(self.error(format!(
                "only one data period per EPW file is allowed, found {}",
                n
            )));
        }

        let n_records_per_hour = self.next_number()? as usize;
        if n_records_per_hour != 1 {
            return Err(self.error(format!(
                "only one record per hour is allowed, found {}",
                n_records_per_hour
            )));
        }

        // Name, start day of the week, start day and end day. We don't need them
        self.scan_line();

        // Now scan until the file is finished
        while !self.is_finished() {
            let line = self.line;
            let fields = self.scan_line();
            if fields.iter().all(|f| f.iter().all(|b| b.is_ascii_whitespace())) {
                continue;
            }
            if fields.len() < MIN_DATA_FIELDS {
                return Err(DataFormatError::Epw {
                    path: self.path.to_path_buf(),
                    line,
                    reason: format!(
                        "expected at least {} fields in data line, found {}",
                        MIN_DATA_FIELDS,
                        fields.len()
                    ),
                });
            }
            let num = |i: usize| {
                self.to_number(fields.get(i).copied())
                    .map_err(|e| match e {
                        DataFormatError::Epw { path, reason, .. } => {
                            DataFormatError::Epw { path, line, reason }
                        }
                        e => e,
                    })
            };

            let wind_direction = num(20)?;
            epw.data.push(EPWWeatherLine {
                year: num(0)? as i32,
                month: num(1)? as u8,
                day: num(2)? as u8,
                hour: num(3)? as u8,
                minute: num(4)? as u8,
                dry_bulb_temperature: num(6)?,
                relative_humidity: num(8)?,
                atmospheric_station_pressure: num(9)?,
                global_horizontal_radiation: num(13)?,
                direct_normal_radiation: num(14)?,
                diffuse_horizontal_radiation: num(15)?,
                wind_direction: if wind_direction >= MISSING_WIND_DIRECTION {
                    None
                } else {
                    Some(wind_direction)
                },
                wind_speed: num(21)?,
                total_sky_cover: num(22)?,
                precipitable_water: num(28)?,
            })
        }
        Ok(())
    }

    /// Parses a location... assumes that the LOCATION
    /// keyword has been consumed already
    fn parse_location(&mut self, epw: &mut EPWWeather) -> Result<(), DataFormatError> {
        epw.location.city = self.next_string()?;
        let _state = self.next_string()?;
        epw.location.country = self.next_string()?;
        let _source = self.next_string()?;
        let _wmo = self.next_string()?;

        epw.location.latitude = self.next_number()?;
        epw.location.longitude = self.next_number()?;
        epw.location.utc_offset = self.next_number()?;
        epw.location.altitude = self.next_number()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE: &str = "LOCATION,SANTIAGO,-,CHL,IWEC Data,855740,-33.38,-70.78,-4.0,476.0\nDESIGN CONDITIONS,1,Climate Design Data 2009 ASHRAE Handbook,,Heating,7,-1.1,0,-2.7,3.2,4.1,-1.4,3.6,4.4,8.3,9.6,6.5,10.7,0.9,30,Cooling,1,17.2,31.8,18,30.7,17.8,29.7,17.5,19.5,29,18.8,28.4,18.3,27.9,5.7,200,15.8,11.9,23.8,14.9,11.2,23,14.1,10.6,22,57.5,29.2,55.3,28.4,53.3,28,1149,Extremes,8.4,7.4,6.5,27.1,-3.5,34.5,1.3,1.1,-4.4,35.3,-5.2,35.9,-5.9,36.6,-6.8,37.4\nGROUND TEMPERATURES,3,.5,,,,18.03,20.05,20.54,19.99,17.11,13.95,11.03,8.95,8.41,9.49,11.96,15.03,2,,,,16.15,18.06,18.93,18.92,17.37,15.20,12.89,10.95,9.98,10.23,11.65,13.77,4,,,,14.90,16.39,17.29,17.55,16.95,15.67,14.11,12.60,11.61,11.40,12.03,13.28\nHOLIDAYS/DAYLIGHT SAVINGS,No,0,0,0\nCOMMENTS 1,\"IWEC- WMO#855740 - South America -- Original Source Data (c) 2001 American Society of Heating, Refrigerating and Air-Conditioning Engineers (ASHRAE), Inc., Atlanta, GA, USA.\"\nCOMMENTS 2, -- Ground temps produced with a standard soil diffusivity of 2.3225760E-03 {m**2/day}\nDATA PERIODS,1,1,Data,Sunday, 1/ 1,12/31\n1987,1,1,1,60,C9C9C9C9*0?9?9?9?9?9?9?9A7A7B8B8A7*0*0E8*0*0,16.7,9.6,63,95600,0,1415,326,0,0,0,0,0,0,0,150,1.5,0,0,9.9,77777,9,999999999,0,0.2680,0,88,0.000,0.0,0.0\n1987,1,1,2,60,C9C9C9C9*0?9?9?9?9?9?9?9A7A7A7A7A7A7*0E8*0*0,15.1,8.4,64,95700,0,1415,317,0,0,0,0,0,0,0,999,0.0,0,0,15.0,22000,9,999999999,0,0.2680,0,88,0.000,0.0,0.0\n1987,1,1,3,60,C9C9C9C9*0?9?9?9?9?9?9?9A7A7B8B8A7*0*0E8*0*0,13.8,7.6,66,95700,0,1415,311,0,0,0,0,0,0,0,0,0.0,0,0,9.9,22000,9,999999999,0,0.2680,0,88,0.000,0.0,0.0\r\n1987,1,1,4,60,C9C9C9C9*0?9?9?9?9?9?9?9A7A7B8B8A7*0*0E8*0*0,12.7,7.3,70,95700,0,1415,306,0,0,0,0,0,0,0,0,0.0,0,0,9.9,22000,9,999999999,0,0.2680,0,88,0.000,0.0,0.0\n";

    #[test]
    fn test_scan_element() -> Result<(), String> {
        let raw_source = "Hello,,how\n,are,you\n\"auto,con,ruedas\",tres".to_string();
        let source: Vec<u8> = raw_source.into_bytes();
        let path = Path::new("test.epw");

        let mut s = EPWScanner::new(&source, path);
        let mut next = || -> Result<String, String> {
            s.next_string().map_err(|e| e.to_string())
        };

        assert_eq!("Hello".to_string(), next()?);
        assert_eq!("".to_string(), next()?);
        assert_eq!("how".to_string(), next()?);
        assert_eq!("".to_string(), next()?);
        assert_eq!("are".to_string(), next()?);
        assert_eq!("you".to_string(), next()?);
        assert_eq!("\"auto,con,ruedas\"".to_string(), next()?);
        assert_eq!("tres".to_string(), next()?);
        assert!(next().is_err());

        Ok(())
    }

    #[test]
    fn test_scan_line() {
        let source = b"a,b,c\nd,e\r\nf".to_vec();
        let mut s = EPWScanner::new(&source, Path::new("test.epw"));
        assert_eq!(s.scan_line().len(), 3);
        assert_eq!(s.line, 2);
        let l = s.scan_line();
        assert_eq!(l, vec![b"d".as_slice(), b"e".as_slice()]);
        assert_eq!(s.scan_line().len(), 1);
        assert!(s.scan_line().is_empty());
    }

    #[test]
    fn test_location() -> Result<(), DataFormatError> {
        let source = FILE.as_bytes().to_vec();
        let mut s = EPWScanner::new(&source, Path::new("test.epw"));
        let mut epw = EPWWeather::default();

        // This is done by the the function that calls this
        s.scan_element();

        s.parse_location(&mut epw)?;

        assert_eq!(epw.location.city, "SANTIAGO".to_string());
        assert_eq!(epw.location.country, "CHL".to_string());
        assert_eq!(epw.location.latitude, -33.38);
        assert_eq!(epw.location.longitude, -70.78);
        assert_eq!(epw.location.utc_offset, -4.);
        assert_eq!(epw.location.altitude, 476.0);

        assert_eq!(s.next_string()?, "DESIGN CONDITIONS".to_string());

        Ok(())
    }

    #[test]
    fn test_parse_file() -> Result<(), DataFormatError> {
        let source = FILE.as_bytes().to_vec();
        let epw = EPWScanner::build_weather_file(&source, Path::new("test.epw"))?;

        // Location
        assert_eq!(epw.location.city, "SANTIAGO".to_string());
        assert_eq!(epw.location.utc_offset, -4.);

        // Data
        assert_eq!(epw.data.len(), 4);
        assert_eq!(epw.data[0].hour, 1);
        assert_eq!(epw.data[0].dry_bulb_temperature, 16.7);
        assert_eq!(epw.data[0].relative_humidity, 63.);
        assert_eq!(epw.data[0].atmospheric_station_pressure, 95600.);
        assert_eq!(epw.data[0].wind_direction, Some(150.));
        assert_eq!(epw.data[1].wind_direction, None);
        assert_eq!(epw.data[3].dry_bulb_temperature, 12.7);

        Ok(())
    }

    #[test]
    fn test_errors() {
        let source = FILE.replace("12.7,7.3,70", "12.7,7.3,abc").into_bytes();
        match EPWScanner::build_weather_file(&source, Path::new("test.epw")) {
            Err(DataFormatError::Epw { line, .. }) => assert_eq!(line, 11),
            other => panic!("expected an Epw error, found {:?}", other),
        }

        let source = FILE.replace("DATA PERIODS,1,1", "DATA PERIODS,2,1").into_bytes();
        assert!(EPWScanner::build_weather_file(&source, Path::new("test.epw")).is_err());

        let source = b"DATA PERIODS,1,1,Data,Sunday, 1/ 1,12/31\n".to_vec();
        assert!(EPWScanner::build_weather_file(&source, Path::new("test.epw")).is_err());
    }
}
